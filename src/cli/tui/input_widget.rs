// Input Widget - Helper to render tui-textarea with ghost text
//
// Note: This is not a proper Widget implementation due to tui-textarea's API.
// Instead, we provide a helper function to render the textarea and paint the
// overlay next to its cursor.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::Paragraph,
    Frame,
};
use tui_textarea::TextArea;

use crate::compose::{Overlay, LOADING_PLACEHOLDER};

/// Render a TextArea with a colored prompt prefix and the current overlay
pub fn render_input_widget(
    frame: &mut Frame,
    textarea: &TextArea<'_>,
    area: Rect,
    prompt: &str,
    overlay: &Overlay,
) {
    // Split area: prompt (3 chars) + textarea (rest)
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(3), // Prompt: " ❯ "
            Constraint::Min(1),    // Textarea: rest of line
        ])
        .split(area);

    let prompt_widget = Paragraph::new(Span::styled(
        format!(" {} ", prompt),
        Style::default().fg(Color::Cyan),
    ));
    frame.render_widget(prompt_widget, chunks[0]);

    frame.render_widget(textarea, chunks[1]);

    let Some((ghost, style)) = overlay_span(overlay) else {
        return;
    };

    let (cursor_row, cursor_col) = textarea.cursor();
    let line = textarea.lines().get(cursor_row).map(String::as_str).unwrap_or("");
    let span = Span::styled(ghost, style);
    if let Some(ghost_area) = ghost_area(
        chunks[1],
        cursor_row,
        display_column(line, cursor_col),
        span.width(),
    ) {
        frame.render_widget(Paragraph::new(span), ghost_area);
    }
}

/// Terminal cells taken by the first `char_col` chars of `line`
fn display_column(line: &str, char_col: usize) -> usize {
    let prefix: String = line.chars().take(char_col).collect();
    Span::raw(prefix).width()
}

/// Text and style painted for an overlay, `None` when hidden
fn overlay_span(overlay: &Overlay) -> Option<(String, Style)> {
    match overlay {
        Overlay::Hidden => None,
        Overlay::Loading => Some((
            LOADING_PLACEHOLDER.to_string(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM),
        )),
        Overlay::Ghost(text) => {
            let text = terminal_safe(text);
            if text.is_empty() {
                None
            } else {
                Some((text, Style::default().fg(Color::DarkGray)))
            }
        }
    }
}

/// First line of remote text with control characters dropped, so a
/// suggestion can never emit escape sequences into the terminal
fn terminal_safe(text: &str) -> String {
    text.lines()
        .next()
        .unwrap_or("")
        .chars()
        .filter(|c| !c.is_control())
        .collect()
}

/// Cell range right after the cursor cell, clipped to `area`. Columns and
/// widths are in terminal cells. Assumes the textarea is not scrolled.
fn ghost_area(area: Rect, cursor_row: usize, cursor_cells: usize, ghost_cells: usize) -> Option<Rect> {
    let row = u16::try_from(cursor_row).ok()?;
    let col = u16::try_from(cursor_cells).ok()?.saturating_add(1);
    if row >= area.height || col >= area.width {
        return None;
    }

    let available_width = area.width - col;
    let width = available_width.min(u16::try_from(ghost_cells).unwrap_or(u16::MAX));
    if width == 0 {
        return None;
    }

    Some(Rect {
        x: area.x + col,
        y: area.y + row,
        width,
        height: 1,
    })
}
