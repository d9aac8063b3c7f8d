// Acceptance: splice the ghost text into the document

use super::editor::HostEditor;
use super::reconcile::display_fragment;
use super::state::SuggestionState;
use crate::service::{FeedbackEvent, UserId};

/// Result of a successful splice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acceptance {
    /// Fragment inserted at the caret
    pub inserted: String,
    /// Document text after insertion
    pub final_text: String,
    /// Event to report; sent once, never retried
    pub feedback: FeedbackEvent,
}

/// Splice the current display fragment into `editor`.
///
/// The fragment is recomputed against the editor's live text, so it is the
/// same text the overlay showed. Returns `None` (and touches nothing) when
/// there is no ready suggestion for this text, the caret isn't at the end, or
/// the fragment is empty; the keypress should then reach the editor.
pub fn accept_suggestion<E>(
    state: &mut SuggestionState,
    editor: &mut E,
    user_id: &UserId,
) -> Option<Acceptance>
where
    E: HostEditor + ?Sized,
{
    let snapshot = editor.snapshot();
    if !state.is_ready_for(snapshot.text()) {
        return None;
    }
    let fragment = display_fragment(&snapshot, state.raw_suggestion())?.to_string();

    let caret = snapshot.caret();
    let mut final_text = snapshot.text().to_string();
    final_text.insert_str(caret, &fragment);

    editor.set_text(&final_text);
    editor.set_caret(caret + fragment.len());
    state.reset();

    let feedback = FeedbackEvent {
        user_id: user_id.clone(),
        context: snapshot.text().to_string(),
        selected_suggestion: fragment.clone(),
    };

    Some(Acceptance {
        inserted: fragment,
        final_text,
        feedback,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::editor::TextBuffer;
    use crate::compose::state::SuggestionStatus;

    fn ready(source: &str, raw: &str) -> SuggestionState {
        let mut state = SuggestionState::new();
        state.fulfil(source.to_string(), raw.to_string());
        state
    }

    #[test]
    fn accept_appends_trimmed_fragment() {
        let mut editor = TextBuffer::new("I saw the quick");
        let mut state = ready("I saw the quick", "quick brown fox");
        let user = UserId::new("u1");

        let acceptance = accept_suggestion(&mut state, &mut editor, &user).unwrap();

        assert_eq!(acceptance.inserted, "brown fox");
        assert_eq!(acceptance.final_text, "I saw the quickbrown fox");
        assert_eq!(editor.text(), "I saw the quickbrown fox");
        assert_eq!(editor.caret(), "I saw the quickbrown fox".len());
        assert_eq!(state.status(), SuggestionStatus::Idle);
        assert_eq!(
            acceptance.feedback,
            FeedbackEvent {
                user_id: user,
                context: "I saw the quick".to_string(),
                selected_suggestion: "brown fox".to_string(),
            }
        );
    }

    #[test]
    fn nothing_to_accept_leaves_editor_alone() {
        let user = UserId::new("u1");

        let mut editor = TextBuffer::new("hello");
        let mut idle = SuggestionState::new();
        assert!(accept_suggestion(&mut idle, &mut editor, &user).is_none());

        // suggestion restates the text entirely
        let mut state = ready("hello", "hello");
        assert!(accept_suggestion(&mut state, &mut editor, &user).is_none());
        assert_eq!(state.status(), SuggestionStatus::Ready);

        // caret moved away from the end
        let mut state = ready("hello", "hello world");
        editor.set_caret(2);
        assert!(accept_suggestion(&mut state, &mut editor, &user).is_none());
        assert_eq!(editor.text(), "hello");
    }

    #[test]
    fn suggestion_for_other_text_is_not_accepted() {
        let mut editor = TextBuffer::new("hello there");
        let mut state = ready("hello", "hello world");
        assert!(accept_suggestion(&mut state, &mut editor, &UserId::new("u1")).is_none());
        assert_eq!(editor.text(), "hello there");
    }
}
