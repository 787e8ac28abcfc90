//! File logging
//!
//! The TUI owns the terminal, so log output only ever goes to a file in
//! the log directory. Logging stays off unless it is enabled in the config
//! or with `--log`.

use crate::config::ZenoConfig;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// File name inside the log directory
pub const LOG_FILE: &str = "zeno.log";

/// Filter from `RUST_LOG`, else `zeno=<level>`
fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("zeno={level}")))
}

/// Install the global subscriber if logging is enabled
///
/// The returned guard flushes pending lines when dropped and must be kept
/// alive until the program exits. Returns `None` when logging is off or the
/// log directory cannot be created; the program runs on without logs then.
#[must_use]
pub fn init(config: &ZenoConfig, force: bool) -> Option<WorkerGuard> {
    if !(config.logging.enabled || force) {
        return None;
    }

    let dir = match config.log_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Warning: logging disabled: {e}");
            return None;
        }
    };
    init_in(&dir, &config.logging.level)
}

fn init_in(dir: &Path, level: &str) -> Option<WorkerGuard> {
    if let Err(e) = std::fs::create_dir_all(dir) {
        eprintln!("Warning: Could not create log directory {}: {e}", dir.display());
        return None;
    }

    let file_appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let installed = tracing_subscriber::registry()
        .with(filter(level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(false),
        )
        .try_init();

    match installed {
        Ok(()) => {
            tracing::debug!(dir = %dir.display(), "logging initialized");
            Some(guard)
        }
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_logging_installs_nothing() {
        let config = ZenoConfig::default();
        assert!(init(&config, false).is_none());
    }

    #[test]
    fn test_unwritable_dir_is_not_fatal() {
        let dir = tempfile::TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"not a directory").unwrap();
        assert!(init_in(&blocker.join("logs"), "debug").is_none());
    }
}
