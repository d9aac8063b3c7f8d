// Wire types for the suggestion and feedback services

use serde::{Deserialize, Serialize};

use super::identity::UserId;

/// Body of `POST /api/generate-suggestion`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionRequest {
    pub current_text: String,

    /// Only sent when the deployment personalizes per user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

impl SuggestionRequest {
    pub fn new(current_text: impl Into<String>) -> Self {
        Self {
            current_text: current_text.into(),
            user_id: None,
        }
    }

    pub fn with_user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }
}

/// Response of the suggestion endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionResponse {
    pub suggestion: String,

    /// Served from the service's cache; diagnostics only
    #[serde(default)]
    pub cached: bool,
}

impl SuggestionResponse {
    pub fn new(suggestion: impl Into<String>) -> Self {
        Self {
            suggestion: suggestion.into(),
            cached: false,
        }
    }
}

/// Body of `POST /api/feedback`, sent once per accepted suggestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackEvent {
    pub user_id: UserId,
    /// Editor text as it was before the suggestion was inserted
    pub context: String,
    /// The fragment actually inserted
    pub selected_suggestion: String,
}

/// Response of `GET /api/health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub message: String,
}
