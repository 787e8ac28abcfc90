//! Command-line interface definitions and parsing
//!
//! # Commands
//!
//! - **search**: Interactive snippet browser (default)
//! - **add**: Create a snippet through prompts
//! - **list**: Print snippets, optionally filtered
//! - **lang**: Manage languages (add, list, remove)
//! - **config**: Show the config file location or the effective settings
//!
//! Global flags (`--db`, `--quiet`, `--log`) work before or after the
//! subcommand.
//!
//! # Examples
//!
//! ```
//! use zeno::cli::{Cli, Commands};
//!
//! let cli = Cli::parse_from_args(["zeno", "list", "postgres"]);
//! assert!(matches!(cli.get_command(), Commands::List { .. }));
//! ```

use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "zeno")]
#[command(about = "A personal snippet reference for the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Database directory (overrides config)
    #[arg(long = "db", value_name = "PATH", global = true)]
    pub db: Option<PathBuf>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Write a log file even if logging is disabled in the config
    #[arg(long = "log", global = true)]
    pub log: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Browse snippets interactively and copy one (default)
    #[command(visible_alias = "s")]
    Search {
        /// Print the chosen snippet to stdout instead of copying it
        #[arg(short = 'p', long = "print")]
        print: bool,
    },

    /// Add a snippet
    #[command(visible_alias = "a")]
    Add {
        /// Title-case the title (overrides config)
        #[arg(long = "title-case")]
        title_case: bool,
    },

    /// List snippets, most used first
    #[command(visible_alias = "ls")]
    List {
        /// Only list snippets matching every word of the query
        query: Vec<String>,
    },

    /// Manage languages
    #[command(subcommand)]
    Lang(LangCommands),

    /// Show configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Own the clipboard text read from stdin until another program replaces it
    #[command(name = "serve-clipboard", hide = true)]
    ServeClipboard,
}

/// Language management subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum LangCommands {
    /// Register a language
    Add {
        /// Language name, e.g. bash
        name: String,

        /// Short description; its words help rank the language for new snippets
        #[arg(short = 'd', long = "description", default_value = "")]
        description: String,

        /// Formatter tools for the language (repeatable)
        #[arg(short = 'f', long = "formatter", value_name = "TOOL")]
        formatters: Vec<String>,
    },

    /// List languages with their snippet counts
    #[command(visible_alias = "ls")]
    List,

    /// Remove a language no snippet uses
    #[command(visible_alias = "rm")]
    Remove {
        /// Language name
        name: String,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Print the config file location
    Path,

    /// Print the effective configuration
    Show,
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parse from an explicit argument list
    pub fn parse_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::parse_from(args)
    }

    /// Get the command, defaulting to Search if none specified
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Search { print: false })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_command_defaults_to_search() {
        let cli = Cli::parse_from(["zeno"]);
        assert_eq!(cli.get_command(), Commands::Search { print: false });
        assert!(!cli.quiet);
        assert!(cli.db.is_none());
    }

    #[test]
    fn test_search_alias_and_print() {
        let cli = Cli::parse_from(["zeno", "s", "--print"]);
        assert_eq!(cli.get_command(), Commands::Search { print: true });
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["zeno", "ls", "--db", "/tmp/zeno", "-q"]);
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/zeno")));
        assert!(cli.quiet);
        assert_eq!(cli.get_command(), Commands::List { query: vec![] });
    }

    #[test]
    fn test_list_query_words() {
        let cli = Cli::parse_from(["zeno", "list", "db", "connect"]);
        assert_eq!(
            cli.get_command(),
            Commands::List {
                query: vec!["db".into(), "connect".into()]
            }
        );
    }

    #[test]
    fn test_lang_add_with_formatters() {
        let cli = Cli::parse_from([
            "zeno",
            "lang",
            "add",
            "bash",
            "-d",
            "Bourne again shell",
            "-f",
            "shfmt",
            "-f",
            "beautysh",
        ]);
        assert_eq!(
            cli.get_command(),
            Commands::Lang(LangCommands::Add {
                name: "bash".into(),
                description: "Bourne again shell".into(),
                formatters: vec!["shfmt".into(), "beautysh".into()],
            })
        );
    }

    #[test]
    fn test_lang_remove_alias() {
        let cli = Cli::parse_from(["zeno", "lang", "rm", "awk"]);
        assert_eq!(
            cli.get_command(),
            Commands::Lang(LangCommands::Remove { name: "awk".into() })
        );
    }

    #[test]
    fn test_add_and_config() {
        let cli = Cli::parse_from(["zeno", "a", "--title-case", "--log"]);
        assert_eq!(cli.get_command(), Commands::Add { title_case: true });
        assert!(cli.log);

        let cli = Cli::parse_from(["zeno", "config", "show"]);
        assert_eq!(cli.get_command(), Commands::Config(ConfigCommands::Show));
    }

    #[test]
    fn test_clipboard_helper_command_parses() {
        let cli = Cli::parse_from(["zeno", crate::ui::clipboard::SERVE_COMMAND]);
        assert_eq!(cli.get_command(), Commands::ServeClipboard);
    }
}
