// Host editor capability set
//
// The core never owns the document. It reads snapshots (`EditorState`) and, on
// acceptance only, writes back through `HostEditor`.

/// Read-only snapshot of the host widget: text plus caret.
///
/// `caret` is a byte offset into `text` and always sits on a UTF-8 char
/// boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorState {
    text: String,
    caret: usize,
}

impl EditorState {
    /// Build a snapshot; the caret is clamped to the text and moved back onto
    /// the nearest char boundary.
    pub fn new(text: impl Into<String>, caret: usize) -> Self {
        let text = text.into();
        let caret = floor_char_boundary(&text, caret);
        Self { text, caret }
    }

    /// Snapshot with the caret at end-of-text
    pub fn at_end(text: impl Into<String>) -> Self {
        let text = text.into();
        let caret = text.len();
        Self { text, caret }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn caret_at_end(&self) -> bool {
        self.caret == self.text.len()
    }

    pub fn text_before_caret(&self) -> &str {
        &self.text[..self.caret]
    }
}

/// What the core needs from a text-input widget
pub trait HostEditor {
    fn text(&self) -> String;

    /// Caret as a byte offset into `text()`
    fn caret(&self) -> usize;

    fn set_text(&mut self, text: &str);

    fn set_caret(&mut self, caret: usize);

    fn snapshot(&self) -> EditorState {
        EditorState::new(self.text(), self.caret())
    }
}

/// Plain in-memory editor; used by the one-shot CLI and by tests
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
    caret: usize,
}

impl TextBuffer {
    /// New buffer with the caret at the end
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let caret = text.len();
        Self { text, caret }
    }

    /// Type `s` at the caret
    pub fn insert(&mut self, s: &str) {
        self.text.insert_str(self.caret, s);
        self.caret += s.len();
    }

    /// Delete the char before the caret
    pub fn backspace(&mut self) {
        if let Some(ch) = self.text[..self.caret].chars().next_back() {
            self.caret -= ch.len_utf8();
            self.text.remove(self.caret);
        }
    }
}

impl HostEditor for TextBuffer {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn caret(&self) -> usize {
        self.caret
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.caret = floor_char_boundary(&self.text, self.caret);
    }

    fn set_caret(&mut self, caret: usize) {
        self.caret = floor_char_boundary(&self.text, caret);
    }
}

fn floor_char_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caret_is_clamped_and_floored() {
        let state = EditorState::new("héllo", 99);
        assert_eq!(state.caret(), 6);
        assert!(state.caret_at_end());

        // 'é' occupies bytes 1..3
        let state = EditorState::new("héllo", 2);
        assert_eq!(state.caret(), 1);
        assert_eq!(state.text_before_caret(), "h");
    }

    #[test]
    fn at_end_snapshot() {
        let state = EditorState::at_end("the quick");
        assert!(state.caret_at_end());
        assert_eq!(state.text_before_caret(), "the quick");
    }

    #[test]
    fn text_buffer_editing() {
        let mut buffer = TextBuffer::new("hel");
        buffer.insert("lö");
        assert_eq!(buffer.text(), "helö");
        buffer.backspace();
        assert_eq!(buffer.text(), "hel");
        assert_eq!(buffer.caret(), 3);

        buffer.set_caret(0);
        buffer.backspace();
        assert_eq!(buffer.text(), "hel");

        let snapshot = buffer.snapshot();
        assert!(!snapshot.caret_at_end());
    }
}
