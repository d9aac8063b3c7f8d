// Project-wide constants
//
// Centralised here so endpoint paths and timing defaults have one source of
// truth. Import via `use crate::config::constants::*;`.

/// Default base URL of the suggestion / feedback service.
pub const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:8000";

/// Suggestion endpoint (POST `{ current_text, user_id? }` → `{ suggestion }`).
pub const DEFAULT_SUGGESTION_PATH: &str = "/api/generate-suggestion";

/// Feedback endpoint (POST `{ user_id, context, selected_suggestion }`).
pub const DEFAULT_FEEDBACK_PATH: &str = "/api/feedback";

/// Health endpoint (GET → `{ message }`).
pub const DEFAULT_HEALTH_PATH: &str = "/api/health";

/// Quiet period after the last edit before a suggestion is requested.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Per-request timeout for the HTTP client.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Directory under $HOME holding config.toml and the log file.
pub const CONFIG_DIR_NAME: &str = ".ghostline";

pub const CONFIG_FILE_NAME: &str = "config.toml";

pub const LOG_FILE_NAME: &str = "ghostline.log";

// Environment overrides, applied after the config file.
pub const ENV_SERVICE_URL: &str = "GHOSTLINE_SERVICE_URL";
pub const ENV_USER_ID: &str = "GHOSTLINE_USER_ID";
pub const ENV_DEBOUNCE_MS: &str = "GHOSTLINE_DEBOUNCE_MS";
