// Inline completion core
//
// Data flow:  edit → FetchController (debounce) → SuggestionService →
//             SuggestionState → reconcile (trim overlap) → Overlay → sink
// Acceptance: accept key → reconcile again → splice → FeedbackService
//
// Everything here runs on the host's event loop. Spawned tasks (debounce
// timers, requests, feedback) only send messages back; they never touch state.

mod accept;
mod controller;
mod editor;
mod overlay;
mod reconcile;
mod session;
mod state;

pub use accept::{accept_suggestion, Acceptance};
pub use controller::{FetchController, SessionEvent};
pub use editor::{EditorState, HostEditor, TextBuffer};
pub use overlay::{escape_html, LatestOverlay, Overlay, OverlaySink, LOADING_PLACEHOLDER};
pub use reconcile::{display_fragment, overlap_chars, PHRASE_WINDOW};
pub use session::{AcceptOutcome, CompletionSession, SessionOptions};
pub use state::{SuggestionState, SuggestionStatus};
