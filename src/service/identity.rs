// Opaque per-client user identifier

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identifier attached to feedback events.
///
/// Storage is the host's concern; when nothing is configured a fresh v4 UUID
/// is used for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Use the configured id if present and non-blank, else generate one
    pub fn from_config(configured: Option<&str>) -> Self {
        match configured.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => Self::new(id),
            None => Self::generate(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
