// Status Widget - one-line status bar under the editor
//
// Shows the suggestion lifecycle state on the left and key hints on the right.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::compose::SuggestionStatus;
use crate::config::AcceptKey;

pub struct StatusWidget {
    status: SuggestionStatus,
    accept_key: AcceptKey,
}

impl StatusWidget {
    pub fn new(status: SuggestionStatus, accept_key: AcceptKey) -> Self {
        Self { status, accept_key }
    }

    fn status_style(&self) -> Style {
        match self.status {
            SuggestionStatus::Ready => Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            SuggestionStatus::Loading => Style::default().fg(Color::Yellow),
            SuggestionStatus::Idle | SuggestionStatus::Stale => {
                Style::default().fg(Color::DarkGray)
            }
        }
    }

    fn hints(&self) -> String {
        let key = match self.accept_key {
            AcceptKey::Tab => "Tab",
            AcceptKey::Right => "→",
        };
        format!("{} accept · Esc quit ", key)
    }
}

impl Widget for StatusWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let hints = self.hints();
        let hints_width = u16::try_from(hints.chars().count())
            .unwrap_or(u16::MAX)
            .min(area.width);
        let [status_area, hints_area] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(hints_width),
        ])
        .areas(area);

        let left = Line::from(vec![
            Span::styled(" suggestion: ", Style::default().fg(Color::DarkGray)),
            Span::styled(self.status.to_string(), self.status_style()),
        ]);
        Paragraph::new(left).render(status_area, buf);

        Paragraph::new(Span::styled(hints, Style::default().fg(Color::DarkGray)))
            .alignment(Alignment::Right)
            .render(hints_area, buf);
    }
}
