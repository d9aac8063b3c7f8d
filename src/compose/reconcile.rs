// Overlap trimming
//
// Completion backends often echo the words the user just typed. Before a raw
// suggestion is shown (or inserted) we strip the prefix that restates the last
// word or the last few words before the caret. Render and accept both go
// through `display_fragment`, so they can never disagree.

use super::editor::EditorState;

/// How many trailing words are compared as a phrase
pub const PHRASE_WINDOW: usize = 3;

/// Number of leading chars of `suggestion` that restate the tail of
/// `text_before_caret`, or `None` when there is no overlap.
///
/// Compares case-insensitively against both the last word and the last
/// `PHRASE_WINDOW` words (joined by single spaces) and prefers the longer
/// match.
pub fn overlap_chars(text_before_caret: &str, suggestion: &str) -> Option<usize> {
    let words: Vec<&str> = text_before_caret.split_whitespace().collect();
    let last_word = *words.last()?;
    let last_phrase = words[words.len().saturating_sub(PHRASE_WINDOW)..].join(" ");

    let word_match = starts_with_ignore_case(suggestion, last_word);
    let phrase_match = starts_with_ignore_case(suggestion, &last_phrase);
    if !word_match && !phrase_match {
        return None;
    }

    let word_len = last_word.chars().count();
    let phrase_len = if phrase_match {
        last_phrase.chars().count()
    } else {
        0
    };
    Some(word_len.max(phrase_len))
}

/// The part of `raw_suggestion` that is safe to show after the caret.
///
/// `None` when the caret is not at end-of-text or nothing but whitespace is
/// left after trimming.
pub fn display_fragment<'s>(editor: &EditorState, raw_suggestion: &'s str) -> Option<&'s str> {
    if !editor.caret_at_end() {
        return None;
    }

    let fragment = match overlap_chars(editor.text_before_caret(), raw_suggestion) {
        Some(overlap) => skip_chars(raw_suggestion, overlap).trim_start(),
        None => raw_suggestion,
    };

    if fragment.trim().is_empty() {
        None
    } else {
        Some(fragment)
    }
}

fn starts_with_ignore_case(haystack: &str, prefix: &str) -> bool {
    let mut hay = haystack.chars().flat_map(char::to_lowercase);
    prefix
        .chars()
        .flat_map(char::to_lowercase)
        .all(|p| hay.next() == Some(p))
}

fn skip_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[idx..],
        None => "",
    }
}
