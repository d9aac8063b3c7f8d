// Debounced fetch controller
//
// Decides when a suggestion is requested. Timers and requests run as spawned
// tasks that report back on the session's channel; all state changes happen
// on the session's event loop when those messages are handled.
//
// Every edit bumps `generation`. A timer only fires for the generation that
// started it, and a response is only applied if the editor still holds the
// exact text it was requested for.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use super::state::SuggestionState;
use crate::errors::CompletionError;
use crate::service::{SuggestionRequest, SuggestionResponse, SuggestionService, UserId};

/// Messages from timer and request tasks back to the session loop
#[derive(Debug)]
pub enum SessionEvent {
    DebounceElapsed {
        generation: u64,
    },
    SuggestionArrived {
        generation: u64,
        request_text: String,
        outcome: Result<SuggestionResponse, CompletionError>,
    },
}

pub struct FetchController {
    service: Arc<dyn SuggestionService>,
    events: UnboundedSender<SessionEvent>,
    debounce: Duration,
    /// Attached to requests when the deployment personalizes
    request_user: Option<UserId>,

    generation: u64,
    timer: Option<JoinHandle<()>>,
    in_flight: usize,
    settled: Option<Settled>,
}

/// Text the service already answered, or that an acceptance produced
#[derive(Debug, Clone)]
struct Settled {
    text: String,
    /// `None` after an acceptance
    suggestion: Option<String>,
}

impl FetchController {
    pub fn new(
        service: Arc<dyn SuggestionService>,
        events: UnboundedSender<SessionEvent>,
        debounce: Duration,
        request_user: Option<UserId>,
    ) -> Self {
        Self {
            service,
            events,
            debounce,
            request_user,
            generation: 0,
            timer: None,
            in_flight: 0,
            settled: None,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// A debounce timer is pending or a request has not reported back yet
    pub fn is_busy(&self) -> bool {
        self.timer.is_some() || self.in_flight > 0
    }

    /// Handle an edit. Returns `false` when the text is the one the last
    /// completed request was made for; its suggestion (if any) is restored
    /// and no request is scheduled.
    pub fn on_text_changed(&mut self, new_text: &str, state: &mut SuggestionState) -> bool {
        self.generation += 1;
        self.cancel_timer();

        if let Some(settled) = self.settled.as_ref().filter(|s| s.text == new_text) {
            tracing::trace!("Text matches last settled request; not re-requesting");
            match &settled.suggestion {
                Some(suggestion) => state.fulfil(settled.text.clone(), suggestion.clone()),
                None => state.reset(),
            }
            return false;
        }

        if new_text.trim().is_empty() {
            state.reset();
        } else {
            state.begin_loading();
        }
        self.start_timer();
        true
    }

    pub fn on_debounce_elapsed(
        &mut self,
        generation: u64,
        current_text: &str,
        state: &mut SuggestionState,
    ) {
        if generation != self.generation {
            tracing::trace!(generation, current = self.generation, "Superseded timer ignored");
            return;
        }
        self.timer = None;

        if current_text.trim().is_empty() {
            state.reset();
            return;
        }

        state.begin_loading();
        self.dispatch(current_text);
    }

    /// Apply (or discard) a response. Failures and stale responses are logged
    /// here and surface only as the absence of a suggestion.
    pub fn on_response(
        &mut self,
        generation: u64,
        request_text: String,
        outcome: Result<SuggestionResponse, CompletionError>,
        current_text: &str,
        state: &mut SuggestionState,
    ) {
        self.in_flight = self.in_flight.saturating_sub(1);
        // A newer edit owns the state; leave its loading indicator alone.
        let superseded = generation != self.generation;

        if request_text != current_text {
            if !superseded {
                state.reset();
            }
            let err = CompletionError::stale(&request_text, current_text);
            tracing::debug!(generation, "{}", err);
            return;
        }

        match outcome {
            Ok(response) => {
                // The live text is answered; a pending timer would only repeat it.
                self.cancel_timer();
                tracing::debug!(
                    generation,
                    cached = response.cached,
                    "Suggestion ready"
                );
                self.settled = Some(Settled {
                    text: request_text.clone(),
                    suggestion: Some(response.suggestion.clone()),
                });
                state.fulfil(request_text, response.suggestion);
            }
            Err(err) => {
                if !superseded {
                    state.reset();
                }
                tracing::warn!(generation, "Suggestion request failed: {}", err);
            }
        }
    }

    /// Record text produced by accepting a suggestion so the host's echo of
    /// that edit doesn't trigger a new request.
    pub fn mark_settled(&mut self, text: String) {
        self.generation += 1;
        self.cancel_timer();
        self.settled = Some(Settled {
            text,
            suggestion: None,
        });
    }

    fn start_timer(&mut self) {
        let generation = self.generation;
        let delay = self.debounce;
        let events = self.events.clone();
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = events.send(SessionEvent::DebounceElapsed { generation });
        }));
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }

    fn dispatch(&mut self, text: &str) {
        let mut request = SuggestionRequest::new(text);
        if let Some(user) = &self.request_user {
            request = request.with_user(user.clone());
        }

        let generation = self.generation;
        let service = Arc::clone(&self.service);
        let events = self.events.clone();
        self.in_flight += 1;

        tracing::debug!(
            generation,
            chars = request.current_text.chars().count(),
            "Dispatching suggestion request"
        );

        tokio::spawn(async move {
            let outcome = service.suggest(&request).await;
            let _ = events.send(SessionEvent::SuggestionArrived {
                generation,
                request_text: request.current_text,
                outcome,
            });
        });
    }
}

impl Drop for FetchController {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::SuggestionStatus;
    use async_trait::async_trait;
    use tokio::sync::mpsc;

    struct Unreachable;

    #[async_trait]
    impl SuggestionService for Unreachable {
        async fn suggest(
            &self,
            _request: &SuggestionRequest,
        ) -> Result<SuggestionResponse, CompletionError> {
            Err(CompletionError::NetworkFailure("unreachable".to_string()))
        }
    }

    fn controller() -> FetchController {
        let (tx, _rx) = mpsc::unbounded_channel();
        FetchController::new(Arc::new(Unreachable), tx, Duration::from_millis(500), None)
    }

    #[tokio::test(start_paused = true)]
    async fn superseded_failure_keeps_newer_loading_state() {
        let mut controller = controller();
        let mut state = SuggestionState::new();

        controller.on_text_changed("hel", &mut state);
        let old_generation = controller.generation();
        controller.on_text_changed("hello", &mut state);

        controller.on_response(
            old_generation,
            "hel".to_string(),
            Err(CompletionError::NetworkFailure("timeout".to_string())),
            "hello",
            &mut state,
        );

        assert_eq!(state.status(), SuggestionStatus::Loading);
    }

    #[tokio::test(start_paused = true)]
    async fn fresh_response_settles_text() {
        let mut controller = controller();
        let mut state = SuggestionState::new();

        controller.on_text_changed("hello", &mut state);
        let generation = controller.generation();
        controller.on_response(
            generation,
            "hello".to_string(),
            Ok(SuggestionResponse::new("hello world")),
            "hello",
            &mut state,
        );

        assert_eq!(state.status(), SuggestionStatus::Ready);
        assert!(!controller.is_busy());
        // Same text again is a no-op
        assert!(!controller.on_text_changed("hello", &mut state));
        assert_eq!(state.status(), SuggestionStatus::Ready);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_timer_is_ignored() {
        let mut controller = controller();
        let mut state = SuggestionState::new();

        controller.on_text_changed("a", &mut state);
        let first = controller.generation();
        controller.on_text_changed("ab", &mut state);

        controller.on_debounce_elapsed(first, "ab", &mut state);
        assert!(controller.is_busy());
        assert_eq!(state.status(), SuggestionStatus::Loading);
    }

    #[tokio::test(start_paused = true)]
    async fn returning_to_settled_text_restores_suggestion_without_timer() {
        let mut controller = controller();
        let mut state = SuggestionState::new();

        controller.on_text_changed("hello", &mut state);
        let generation = controller.generation();
        controller.on_response(
            generation,
            "hello".to_string(),
            Ok(SuggestionResponse::new("hello world")),
            "hello",
            &mut state,
        );

        assert!(controller.on_text_changed("hellox", &mut state));
        assert!(controller.is_busy());
        let pending = controller.generation();

        assert!(!controller.on_text_changed("hello", &mut state));
        assert!(!controller.is_busy());
        assert_ne!(controller.generation(), pending);
        assert!(state.is_ready_for("hello"));
        assert_eq!(state.raw_suggestion(), "hello world");

        // The timer armed for "hellox" can no longer dispatch
        controller.on_debounce_elapsed(pending, "hello", &mut state);
        assert!(!controller.is_busy());
    }
}
