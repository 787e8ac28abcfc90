//! Config command - show where settings live and what they resolve to

use crate::cli::ConfigCommands;
use crate::config::ZenoConfig;
use crate::ui::output::OutputWriter;
use crate::ZenoError;

type Result<T> = std::result::Result<T, ZenoError>;

/// Execute a config subcommand
///
/// # Errors
///
/// Returns an error if the config directory is unknown or the settings
/// cannot be serialized.
pub fn execute(
    command: ConfigCommands,
    config: &ZenoConfig,
    output: &dyn OutputWriter,
) -> Result<()> {
    match command {
        ConfigCommands::Path => {
            output.write(&ZenoConfig::config_path()?.display().to_string());
        }
        ConfigCommands::Show => {
            let mut effective = config.clone();
            effective.database = Some(config.database_path()?);
            output.write(effective.to_toml()?.trim_end());
        }
    }
    Ok(())
}
