//! Zeno CLI application entry point
//!
//! # Usage
//!
//! ```bash
//! # Browse snippets and copy one (default command)
//! zeno
//! zeno search
//!
//! # Print the chosen snippet instead of copying it
//! zeno search --print
//!
//! # Add a snippet, list them, manage languages
//! zeno add
//! zeno list postgres
//! zeno lang add bash -d "Bourne again shell" -f shfmt
//!
//! # Use another database for one run
//! zeno --db /tmp/scratch-db list
//! ```
//!
//! # Configuration
//!
//! Settings are read from the user's config directory
//! (`~/.config/zeno/config.toml` on Linux), created with defaults on
//! first run.

use std::process::ExitCode;
use zeno::{
    ZenoError,
    cli::{Cli, Commands},
    commands,
    config::ZenoConfig,
    db::Database,
    logging,
    ui::{ClipboardSink, DialoguerInput, OutputWriter, StdoutWriter, clipboard},
};

type Result<T> = std::result::Result<T, ZenoError>;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    let output = StdoutWriter::new(cli.quiet);

    let config = match ZenoConfig::load() {
        Ok(config) => config,
        Err(e) => {
            output.error(&ZenoError::from(e).to_string());
            return ExitCode::FAILURE;
        }
    };
    // Keeps the log writer alive until main returns
    let _log_guard = logging::init(&config, cli.log);

    match run(&cli, &config, &output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            output.error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, config: &ZenoConfig, output: &dyn OutputWriter) -> Result<()> {
    let command = cli.get_command();

    match command {
        Commands::Config(subcommand) => return commands::config(subcommand, config, output),
        Commands::ServeClipboard => return Ok(clipboard::serve_stdin()?),
        _ => {}
    }

    let db_path = match &cli.db {
        Some(path) => path.clone(),
        None => config.database_path()?,
    };
    let db = Database::open(&db_path)?;
    tracing::debug!(path = %db_path.display(), "opened database");

    match command {
        Commands::Search { print } => commands::search(&db, config, print, output),
        Commands::Add { title_case } => {
            let input = DialoguerInput::new();
            let mut clipboard = ClipboardSink::new();
            commands::add(
                &db,
                &input,
                &mut clipboard,
                output,
                title_case || config.title_case,
            )
            .map(|_| ())
        }
        Commands::List { query } => commands::list(&db, &query, output),
        Commands::Lang(subcommand) => commands::lang(&db, subcommand, output),
        Commands::Config(_) | Commands::ServeClipboard => Ok(()),
    }
}
