// HTTP client for the suggestion and feedback services
//
// No retries: a failed suggestion is superseded by the next edit anyway, and
// feedback is best-effort by contract.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};

use super::types::{FeedbackEvent, HealthStatus, SuggestionRequest, SuggestionResponse};
use super::{FeedbackService, SuggestionService};
use crate::config::ServiceConfig;
use crate::errors::CompletionError;

#[derive(Clone)]
pub struct HttpCompletionClient {
    client: Client,
    suggestion_url: String,
    feedback_url: String,
    health_url: String,
}

impl HttpCompletionClient {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            suggestion_url: config.suggestion_url(),
            feedback_url: config.feedback_url(),
            health_url: config.health_url(),
        })
    }

    pub fn suggestion_url(&self) -> &str {
        &self.suggestion_url
    }

    /// Ping the service's health endpoint
    pub async fn health(&self) -> Result<HealthStatus> {
        let response = self
            .client
            .get(&self.health_url)
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", self.health_url))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!(
                "Health check failed\n\nStatus: {}\nBody: {}",
                status,
                error_body
            );
        }

        response
            .json()
            .await
            .context("Failed to parse health response")
    }
}

/// Turn a non-success status into a `NetworkFailure` carrying the body
async fn ensure_success(response: Response, what: &str) -> Result<Response, CompletionError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let error_body = response.text().await.unwrap_or_default();
    Err(CompletionError::NetworkFailure(format!(
        "{} request failed with status {}: {}",
        what,
        status,
        error_body.trim()
    )))
}

#[async_trait]
impl SuggestionService for HttpCompletionClient {
    async fn suggest(
        &self,
        request: &SuggestionRequest,
    ) -> Result<SuggestionResponse, CompletionError> {
        tracing::debug!(
            chars = request.current_text.chars().count(),
            "Requesting suggestion from {}",
            self.suggestion_url
        );

        let response = self
            .client
            .post(&self.suggestion_url)
            .json(request)
            .send()
            .await?;

        let response = ensure_success(response, "Suggestion").await?;

        let suggestion: SuggestionResponse = response.json().await.map_err(|e| {
            CompletionError::NetworkFailure(format!("malformed suggestion response: {}", e))
        })?;

        tracing::debug!(
            cached = suggestion.cached,
            chars = suggestion.suggestion.chars().count(),
            "Received suggestion"
        );

        Ok(suggestion)
    }
}

#[async_trait]
impl FeedbackService for HttpCompletionClient {
    async fn record(&self, event: &FeedbackEvent) -> Result<(), CompletionError> {
        let response = self
            .client
            .post(&self.feedback_url)
            .json(event)
            .send()
            .await?;

        ensure_success(response, "Feedback").await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HttpCompletionClient::new(&ServiceConfig::default()).unwrap();
        assert_eq!(
            client.suggestion_url(),
            "http://127.0.0.1:8000/api/generate-suggestion"
        );
    }
}
