// Suggestion lifecycle state
//
// Idle → Loading → Ready → (Stale | Idle). Owned by the session; mutated by
// the fetch controller (request lifecycle) and by the reconciler (staleness).

use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SuggestionStatus {
    #[default]
    Idle,
    /// An edit is settling or a request is on the wire
    Loading,
    Ready,
    /// Editor text drifted away from the text the suggestion was made for
    Stale,
}

impl fmt::Display for SuggestionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SuggestionStatus::Idle => "idle",
            SuggestionStatus::Loading => "loading",
            SuggestionStatus::Ready => "ready",
            SuggestionStatus::Stale => "stale",
        };
        f.write_str(label)
    }
}

/// The current suggestion and the exact text it was requested for.
///
/// Invariant: `raw_suggestion` is non-empty only while `status == Ready`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionState {
    raw_suggestion: String,
    source_text: String,
    status: SuggestionStatus,
}

impl SuggestionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> SuggestionStatus {
        self.status
    }

    pub fn raw_suggestion(&self) -> &str {
        &self.raw_suggestion
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    /// True when a suggestion is ready and was made for exactly `text`
    pub fn is_ready_for(&self, text: &str) -> bool {
        self.status == SuggestionStatus::Ready && self.source_text == text
    }

    /// Drop any suggestion and show the loading placeholder
    pub(crate) fn begin_loading(&mut self) {
        self.clear_payload();
        self.status = SuggestionStatus::Loading;
    }

    pub(crate) fn fulfil(&mut self, source_text: String, raw_suggestion: String) {
        self.source_text = source_text;
        self.raw_suggestion = raw_suggestion;
        self.status = SuggestionStatus::Ready;
    }

    pub(crate) fn reset(&mut self) {
        self.clear_payload();
        self.status = SuggestionStatus::Idle;
    }

    /// If a ready suggestion no longer matches `current_text`, clear it and
    /// mark the state stale. Returns whether that happened.
    pub(crate) fn invalidate_if_stale(&mut self, current_text: &str) -> bool {
        if self.status == SuggestionStatus::Ready && self.source_text != current_text {
            self.clear_payload();
            self.status = SuggestionStatus::Stale;
            return true;
        }
        false
    }

    fn clear_payload(&mut self) {
        self.raw_suggestion.clear();
        self.source_text.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle() {
        let mut state = SuggestionState::new();
        assert_eq!(state.status(), SuggestionStatus::Idle);

        state.begin_loading();
        assert_eq!(state.status(), SuggestionStatus::Loading);
        assert!(!state.is_ready_for(""));

        state.fulfil("Dear".to_string(), "Dear Sir or Madam".to_string());
        assert!(state.is_ready_for("Dear"));
        assert!(!state.is_ready_for("Dear "));

        state.reset();
        assert_eq!(state, SuggestionState::new());
    }

    #[test]
    fn staleness_only_applies_to_ready_state() {
        let mut state = SuggestionState::new();
        state.begin_loading();
        assert!(!state.invalidate_if_stale("anything"));
        assert_eq!(state.status(), SuggestionStatus::Loading);

        state.fulfil("abc".to_string(), "def".to_string());
        assert!(!state.invalidate_if_stale("abc"));
        assert!(state.invalidate_if_stale("abcd"));
        assert_eq!(state.status(), SuggestionStatus::Stale);
        assert_eq!(state.raw_suggestion(), "");
    }
}
