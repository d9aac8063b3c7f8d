// Configuration loader
// Loads ~/.ghostline/config.toml (or an explicit path), then applies
// environment overrides

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::constants::*;
use super::settings::Config;

/// Default location of the config file
pub fn default_config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load configuration from `path` if given, else from the default location.
///
/// A missing default file yields the built-in defaults; a missing explicit
/// path is an error.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let mut config = match path {
        Some(path) => load_config_from(path)?,
        None => {
            let default_path = default_config_path()?;
            if default_path.exists() {
                load_config_from(&default_path)?
            } else {
                tracing::debug!(
                    "No config at {}, using defaults",
                    default_path.display()
                );
                Config::default()
            }
        }
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;

    config
        .validate()
        .context("Configuration validation failed")?;

    Ok(config)
}

/// Parse a config file without env overrides or validation
pub fn load_config_from(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(config)
}

/// Apply `GHOSTLINE_*` overrides. `lookup` is injected so tests don't touch
/// the process environment.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_SERVICE_URL).filter(|v| !v.trim().is_empty()) {
        config.service.base_url = url;
    }

    if let Some(user_id) = lookup(ENV_USER_ID).filter(|v| !v.trim().is_empty()) {
        config.user_id = Some(user_id);
    }

    if let Some(raw) = lookup(ENV_DEBOUNCE_MS).filter(|v| !v.trim().is_empty()) {
        config.compose.debounce_ms = raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be an integer, got '{}'", ENV_DEBOUNCE_MS, raw))?;
    }

    Ok(())
}
