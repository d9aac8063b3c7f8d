// Configuration structs

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::constants::*;

/// Top-level configuration, mirrored 1:1 by `~/.ghostline/config.toml`.
///
/// Every section is optional in the file; missing fields fall back to the
/// defaults below.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Stable identifier attached to feedback (and to suggestion requests when
    /// `service.personalize` is on). A fresh one is generated per process when
    /// unset.
    pub user_id: Option<String>,

    pub service: ServiceConfig,

    pub compose: ComposeConfig,

    pub logging: LoggingConfig,
}

/// Where the suggestion and feedback services live
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL, e.g. "http://127.0.0.1:8000"
    pub base_url: String,
    pub suggestion_path: String,
    pub feedback_path: String,
    pub health_path: String,
    pub timeout_secs: u64,
    /// Send `user_id` with suggestion requests for per-user personalization
    pub personalize: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SERVICE_URL.to_string(),
            suggestion_path: DEFAULT_SUGGESTION_PATH.to_string(),
            feedback_path: DEFAULT_FEEDBACK_PATH.to_string(),
            health_path: DEFAULT_HEALTH_PATH.to_string(),
            timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            personalize: false,
        }
    }
}

impl ServiceConfig {
    pub fn suggestion_url(&self) -> String {
        join_url(&self.base_url, &self.suggestion_path)
    }

    pub fn feedback_url(&self) -> String {
        join_url(&self.base_url, &self.feedback_path)
    }

    pub fn health_url(&self) -> String {
        join_url(&self.base_url, &self.health_path)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Key that accepts the ghost text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AcceptKey {
    #[default]
    Tab,
    /// Right arrow; only intercepted while a suggestion is showing
    Right,
}

/// Editing-session behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposeConfig {
    /// Quiet period after the last keystroke before a request is issued
    pub debounce_ms: u64,
    pub accept_key: AcceptKey,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            accept_key: AcceptKey::default(),
        }
    }
}

impl ComposeConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when RUST_LOG is unset (e.g. "info", "ghostline=debug")
    pub level: String,
    /// Log file used while the terminal editor owns the screen
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Validate configuration values
    pub fn validate(&self) -> anyhow::Result<()> {
        let base = self.service.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            anyhow::bail!(
                "Invalid service.base_url '{}': must start with http:// or https://",
                self.service.base_url
            );
        }

        if self.service.timeout_secs == 0 {
            anyhow::bail!("service.timeout_secs must be greater than zero");
        }

        if let Some(user_id) = &self.user_id {
            if user_id.trim().is_empty() {
                anyhow::bail!("user_id must not be blank when set");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_service() {
        let config = Config::default();
        assert_eq!(
            config.service.suggestion_url(),
            "http://127.0.0.1:8000/api/generate-suggestion"
        );
        assert_eq!(config.service.feedback_url(), "http://127.0.0.1:8000/api/feedback");
        assert_eq!(config.service.health_url(), "http://127.0.0.1:8000/api/health");
        assert_eq!(config.compose.debounce(), Duration::from_millis(500));
        assert_eq!(config.compose.accept_key, AcceptKey::Tab);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn url_join_tolerates_slashes() {
        assert_eq!(join_url("http://h:1/", "/api/x"), "http://h:1/api/x");
        assert_eq!(join_url("http://h:1", "api/x"), "http://h:1/api/x");
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = Config::default();
        config.service.base_url = "ftp://nope".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.service.timeout_secs = 0;
        assert!(config.validate().is_err());

        let config = Config {
            user_id: Some("  ".to_string()),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
