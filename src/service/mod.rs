// External collaborators: the suggestion service and the feedback store
//
// The core only talks to these traits. `HttpCompletionClient` implements both
// over HTTP; tests substitute in-memory fakes.

use async_trait::async_trait;

use crate::errors::CompletionError;

pub mod client;
pub mod identity;
pub mod types;

pub use client::HttpCompletionClient;
pub use identity::UserId;
pub use types::{FeedbackEvent, HealthStatus, SuggestionRequest, SuggestionResponse};

/// Produces a continuation for the text typed so far
#[async_trait]
pub trait SuggestionService: Send + Sync {
    /// Request one suggestion. Any failure (transport, non-success status,
    /// malformed body) maps to `CompletionError::NetworkFailure`.
    async fn suggest(&self, request: &SuggestionRequest)
        -> Result<SuggestionResponse, CompletionError>;
}

/// Records which suggestion a user accepted
#[async_trait]
pub trait FeedbackService: Send + Sync {
    /// Deliver one event. Callers never retry.
    async fn record(&self, event: &FeedbackEvent) -> Result<(), CompletionError>;
}
