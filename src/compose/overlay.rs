// Overlay presentation
//
// The session decides *what* to show (`Overlay`); hosts decide *how* through an
// `OverlaySink`. Markup output escapes the remote text, which is untrusted.

use super::editor::EditorState;
use super::reconcile::display_fragment;
use super::state::{SuggestionState, SuggestionStatus};

/// What should currently be painted after the caret
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Overlay {
    #[default]
    Hidden,
    /// Request pending; hosts show a placeholder
    Loading,
    /// Trimmed suggestion text, unescaped
    Ghost(String),
}

/// Placeholder painted while a suggestion is loading
pub const LOADING_PLACEHOLDER: &str = "...";

impl Overlay {
    /// Compute the overlay for `state` against the live editor.
    ///
    /// Callers run the staleness check first; a `Ready` state here is assumed
    /// to match `editor.text()`.
    pub fn compose(state: &SuggestionState, editor: &EditorState) -> Self {
        if !editor.caret_at_end() {
            return Overlay::Hidden;
        }
        match state.status() {
            SuggestionStatus::Loading => Overlay::Loading,
            SuggestionStatus::Ready => display_fragment(editor, state.raw_suggestion())
                .map(|fragment| Overlay::Ghost(fragment.to_string()))
                .unwrap_or(Overlay::Hidden),
            SuggestionStatus::Idle | SuggestionStatus::Stale => Overlay::Hidden,
        }
    }

    pub fn ghost_text(&self) -> Option<&str> {
        match self {
            Overlay::Ghost(text) => Some(text),
            _ => None,
        }
    }

    /// HTML for web-style hosts
    pub fn to_markup(&self) -> String {
        match self {
            Overlay::Hidden => String::new(),
            Overlay::Loading => format!(
                r#"<span class="suggestion-text loading">{}</span>"#,
                LOADING_PLACEHOLDER
            ),
            Overlay::Ghost(text) => {
                format!(r#"<span class="suggestion-text">{}</span>"#, escape_html(text))
            }
        }
    }
}

/// Escape the five HTML-significant characters
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Render callback supplied by the host
pub trait OverlaySink {
    fn render(&mut self, overlay: Overlay);
}

/// Sink that keeps only the most recent overlay; hosts read it at paint time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LatestOverlay {
    overlay: Overlay,
}

impl LatestOverlay {
    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }
}

impl OverlaySink for LatestOverlay {
    fn render(&mut self, overlay: Overlay) {
        self.overlay = overlay;
    }
}
