// CompletionSession: one editing session's worth of suggestion state
//
// Hosts call the `on_*` handlers as UI events happen and feed every message
// from `next_event()` back into `handle_event()`. Each handler ends by
// pushing a fresh `Overlay` into the host's sink.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::task::JoinHandle;

use super::accept::accept_suggestion;
use super::controller::{FetchController, SessionEvent};
use super::editor::{EditorState, HostEditor};
use super::overlay::{Overlay, OverlaySink};
use super::state::SuggestionState;
use crate::config::{constants::DEFAULT_DEBOUNCE_MS, Config};
use crate::service::{FeedbackEvent, FeedbackService, SuggestionService, UserId};

/// Session tunables
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub debounce: Duration,
    pub user_id: UserId,
    /// Attach `user_id` to suggestion requests
    pub personalize: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            user_id: UserId::generate(),
            personalize: false,
        }
    }
}

impl SessionOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            debounce: config.compose.debounce(),
            user_id: UserId::from_config(config.user_id.as_deref()),
            personalize: config.service.personalize,
        }
    }
}

/// What happened to an accept keypress
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcceptOutcome {
    /// The fragment was spliced in; the host must swallow the key
    Accepted { inserted: String },
    /// No active suggestion; the key belongs to the editor
    PassThrough,
}

pub struct CompletionSession<R: OverlaySink> {
    state: SuggestionState,
    controller: FetchController,
    feedback: Arc<dyn FeedbackService>,
    user_id: UserId,
    renderer: R,
    events: UnboundedReceiver<SessionEvent>,
    feedback_tasks: Vec<JoinHandle<()>>,
}

impl<R: OverlaySink> CompletionSession<R> {
    pub fn new(
        suggestions: Arc<dyn SuggestionService>,
        feedback: Arc<dyn FeedbackService>,
        renderer: R,
        options: SessionOptions,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let request_user = options.personalize.then(|| options.user_id.clone());
        let controller = FetchController::new(suggestions, tx, options.debounce, request_user);

        Self {
            state: SuggestionState::new(),
            controller,
            feedback,
            user_id: options.user_id,
            renderer,
            events: rx,
            feedback_tasks: Vec::new(),
        }
    }

    pub fn state(&self) -> &SuggestionState {
        &self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// A debounce timer or request is outstanding, so `next_event()` will
    /// eventually yield
    pub fn is_busy(&self) -> bool {
        self.controller.is_busy()
    }

    // ── Host handlers ─────────────────────────────────────────────────────────

    pub fn on_text_changed(&mut self, editor: &EditorState) {
        self.controller.on_text_changed(editor.text(), &mut self.state);
        self.render(editor);
    }

    /// Arrow keys, Home/End, mouse clicks
    pub fn on_caret_moved(&mut self, editor: &EditorState) {
        self.render(editor);
    }

    /// Window or container resize, scroll
    pub fn on_viewport_changed(&mut self, editor: &EditorState) {
        self.render(editor);
    }

    /// Accept the ghost text if there is any. On `PassThrough` the host must
    /// deliver the key to the editor as usual.
    pub fn on_accept_key<E>(&mut self, editor: &mut E) -> AcceptOutcome
    where
        E: HostEditor + ?Sized,
    {
        let Some(acceptance) = accept_suggestion(&mut self.state, editor, &self.user_id) else {
            return AcceptOutcome::PassThrough;
        };

        self.controller.mark_settled(acceptance.final_text.clone());
        self.send_feedback(acceptance.feedback);
        self.render(&editor.snapshot());

        AcceptOutcome::Accepted {
            inserted: acceptance.inserted,
        }
    }

    // ── Event loop plumbing ───────────────────────────────────────────────────

    /// Next timer / response message. Only await this while `is_busy()` or
    /// alongside other event sources, since it never yields `None` while the
    /// session is alive.
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        self.events.recv().await
    }

    /// Apply a message from `next_event()` against the live editor
    pub fn handle_event(&mut self, event: SessionEvent, editor: &EditorState) {
        match event {
            SessionEvent::DebounceElapsed { generation } => {
                self.controller
                    .on_debounce_elapsed(generation, editor.text(), &mut self.state);
            }
            SessionEvent::SuggestionArrived {
                generation,
                request_text,
                outcome,
            } => {
                self.controller.on_response(
                    generation,
                    request_text,
                    outcome,
                    editor.text(),
                    &mut self.state,
                );
            }
        }
        self.render(editor);
    }

    /// Drain events until no timer or request is outstanding. For one-shot
    /// hosts whose text doesn't change while waiting.
    pub async fn settle(&mut self, editor: &EditorState) {
        while self.is_busy() {
            match self.next_event().await {
                Some(event) => self.handle_event(event, editor),
                None => break,
            }
        }
    }

    /// Wait for feedback deliveries still on the wire
    pub async fn flush_feedback(&mut self) {
        for task in self.feedback_tasks.drain(..) {
            let _ = task.await;
        }
    }

    fn send_feedback(&mut self, event: FeedbackEvent) {
        self.feedback_tasks.retain(|task| !task.is_finished());

        let feedback = Arc::clone(&self.feedback);
        self.feedback_tasks.push(tokio::spawn(async move {
            match feedback.record(&event).await {
                Ok(()) => tracing::debug!("Acceptance feedback delivered"),
                Err(e) => tracing::warn!("Failed to deliver acceptance feedback: {}", e),
            }
        }));
    }

    fn render(&mut self, editor: &EditorState) {
        if self.state.invalidate_if_stale(editor.text()) {
            tracing::debug!("Suggestion no longer matches editor text; cleared");
        }
        let overlay = Overlay::compose(&self.state, editor);
        self.renderer.render(overlay);
    }
}
