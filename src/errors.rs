// Error taxonomy for the completion core
//
// Every variant degrades to "no suggestion shown". Nothing here is fatal to the
// editing session; callers log and move on.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompletionError {
    /// The request could not complete, returned a non-success status, or the
    /// body could not be decoded.
    #[error("network failure: {0}")]
    NetworkFailure(String),

    /// The response arrived for text that no longer matches the editor.
    #[error("stale response discarded (requested {requested_chars} chars, editor has {current_chars})")]
    StaleResponse {
        requested_chars: usize,
        current_chars: usize,
    },
}

impl CompletionError {
    pub fn stale(requested: &str, current: &str) -> Self {
        CompletionError::StaleResponse {
            requested_chars: requested.chars().count(),
            current_chars: current.chars().count(),
        }
    }
}

impl From<reqwest::Error> for CompletionError {
    fn from(err: reqwest::Error) -> Self {
        CompletionError::NetworkFailure(err.to_string())
    }
}
