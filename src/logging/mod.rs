// Logging setup
//
// tracing-subscriber with an EnvFilter. RUST_LOG wins over the configured
// level. While the terminal editor owns the screen, output goes to a log file
// so it never tears the UI; otherwise it goes to stderr.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::config::constants::{CONFIG_DIR_NAME, LOG_FILE_NAME};
use crate::config::LoggingConfig;

/// Where log lines go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// The terminal is in raw mode / alternate screen
    File,
}

/// Install the global subscriber. Call once, before any session starts.
pub fn init_logging(config: &LoggingConfig, target: LogTarget, debug: bool) -> Result<()> {
    let default_directive = if debug { "debug" } else { config.level.as_str() };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .with_context(|| format!("Invalid log level '{}'", default_directive))?;

    match target {
        LogTarget::Stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to install logger: {}", e))?;
        }
        LogTarget::File => {
            let path = log_file_path(config)?;
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create log directory: {}", parent.display())
                })?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to install logger: {}", e))?;
        }
    }

    Ok(())
}

/// Configured log file, else `~/.ghostline/ghostline.log`
pub fn log_file_path(config: &LoggingConfig) -> Result<PathBuf> {
    if let Some(path) = &config.file {
        return Ok(path.clone());
    }
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(CONFIG_DIR_NAME).join(LOG_FILE_NAME))
}
