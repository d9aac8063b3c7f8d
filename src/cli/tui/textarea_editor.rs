// HostEditor adapter for tui-textarea
//
// tui-textarea tracks the cursor as (row, col) in chars; the completion core
// works in byte offsets into the joined text. Conversions live here.

use crossterm::event::KeyEvent;
use ratatui::style::{Modifier, Style};
use tui_textarea::{CursorMove, TextArea};

use crate::compose::HostEditor;

pub struct TextAreaEditor {
    textarea: TextArea<'static>,
}

impl Default for TextAreaEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextAreaEditor {
    pub fn new() -> Self {
        Self {
            textarea: create_clean_textarea(Vec::new()),
        }
    }

    pub fn textarea(&self) -> &TextArea<'static> {
        &self.textarea
    }

    pub fn textarea_mut(&mut self) -> &mut TextArea<'static> {
        &mut self.textarea
    }

    /// Forward a key to the widget. Returns whether the text changed.
    pub fn input(&mut self, key: KeyEvent) -> bool {
        let before = self.text();
        self.textarea.input(key);
        self.text() != before
    }
}

impl HostEditor for TextAreaEditor {
    fn text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    fn caret(&self) -> usize {
        let (row, col) = self.textarea.cursor();
        caret_from_cursor(self.textarea.lines(), row, col)
    }

    fn set_text(&mut self, text: &str) {
        let lines = text.split('\n').map(str::to_string).collect();
        self.textarea = create_clean_textarea(lines);
    }

    fn set_caret(&mut self, caret: usize) {
        let (row, col) = cursor_from_caret(&self.text(), caret);
        let row = u16::try_from(row).unwrap_or(u16::MAX);
        let col = u16::try_from(col).unwrap_or(u16::MAX);
        self.textarea.move_cursor(CursorMove::Jump(row, col));
    }
}

fn create_clean_textarea(lines: Vec<String>) -> TextArea<'static> {
    let mut textarea = if lines.is_empty() {
        TextArea::default()
    } else {
        TextArea::new(lines)
    };
    textarea.set_placeholder_text("Start typing…");

    let clean_style = Style::default();
    textarea.set_style(clean_style);
    textarea.set_cursor_line_style(clean_style);
    textarea.set_cursor_style(Style::default().add_modifier(Modifier::REVERSED));
    textarea.set_placeholder_style(Style::default().add_modifier(Modifier::DIM));

    textarea
}

/// Byte offset into `lines.join("\n")` for a (row, char col) cursor
fn caret_from_cursor(lines: &[String], row: usize, col: usize) -> usize {
    let mut offset = 0;
    for line in lines.iter().take(row) {
        offset += line.len() + 1;
    }
    let Some(line) = lines.get(row) else {
        return offset.saturating_sub(1);
    };
    let col_bytes = line
        .char_indices()
        .nth(col)
        .map(|(idx, _)| idx)
        .unwrap_or(line.len());
    offset + col_bytes
}

/// (row, char col) for a byte offset into `text`; offsets past the end land
/// on the end
fn cursor_from_caret(text: &str, caret: usize) -> (usize, usize) {
    let caret = caret.min(text.len());
    let mut row = 0;
    let mut col = 0;
    for (idx, ch) in text.char_indices() {
        if idx >= caret {
            break;
        }
        if ch == '\n' {
            row += 1;
            col = 0;
        } else {
            col += 1;
        }
    }
    (row, col)
}
