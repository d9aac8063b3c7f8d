// Compose TUI: a single-buffer editor with inline ghost-text completion
//
// Layout
// ──────
//   ┌ ghostline ──────────────────────┐
//   │ ❯ typed text▌ghost text         │   editor (textarea + overlay)
//   └─────────────────────────────────┘
//    suggestion: ready    Tab accept    status line
//
// One task owns the terminal, the editor and the session. Terminal input and
// session messages (debounce timers, responses) are multiplexed with select!.

use anyhow::{Context, Result};
use crossterm::{
    event::{
        DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    widgets::{Block, Borders},
    Terminal,
};
use std::io::{self, Stdout};
use std::sync::Arc;

use crate::compose::{
    AcceptOutcome, CompletionSession, HostEditor, LatestOverlay, SessionOptions,
};
use crate::config::{AcceptKey, Config};
use crate::service::{FeedbackService, SuggestionService};

mod input_widget;
mod status_widget;
mod textarea_editor;

pub use input_widget::render_input_widget;
pub use status_widget::StatusWidget;
pub use textarea_editor::TextAreaEditor;

const PROMPT: &str = "❯";

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Run the interactive editor until the user quits
pub async fn run_compose(
    config: &Config,
    suggestions: Arc<dyn SuggestionService>,
    feedback: Arc<dyn FeedbackService>,
) -> Result<()> {
    let options = SessionOptions::from_config(config);
    tracing::info!(user_id = %options.user_id, "Starting compose session");

    let mut session =
        CompletionSession::new(suggestions, feedback, LatestOverlay::default(), options);
    let mut editor = TextAreaEditor::new();

    let mut terminal = enter_terminal()?;
    let result = event_loop(
        &mut terminal,
        &mut session,
        &mut editor,
        config.compose.accept_key,
    )
    .await;
    let restored = leave_terminal(&mut terminal);

    session.flush_feedback().await;
    tracing::info!("Compose session ended");

    result?;
    restored
}

fn enter_terminal() -> Result<Tui> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )
    .context("Failed to enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")
}

fn leave_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

async fn event_loop(
    terminal: &mut Tui,
    session: &mut CompletionSession<LatestOverlay>,
    editor: &mut TextAreaEditor,
    accept_key: AcceptKey,
) -> Result<()> {
    let mut input = EventStream::new();

    loop {
        draw(terminal, session, editor, accept_key)?;

        tokio::select! {
            maybe_event = input.next() => {
                let Some(event) = maybe_event else {
                    break;
                };
                let event = event.context("Failed to read terminal event")?;
                if handle_terminal_event(event, session, editor, accept_key) == Flow::Quit {
                    break;
                }
            }
            Some(event) = session.next_event() => {
                session.handle_event(event, &editor.snapshot());
            }
        }
    }

    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

fn handle_terminal_event(
    event: Event,
    session: &mut CompletionSession<LatestOverlay>,
    editor: &mut TextAreaEditor,
    accept_key: AcceptKey,
) -> Flow {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            if is_quit(&key) {
                return Flow::Quit;
            }
            if is_accept(&key, accept_key) {
                if let AcceptOutcome::Accepted { inserted } = session.on_accept_key(editor) {
                    tracing::debug!(chars = inserted.chars().count(), "Accepted suggestion");
                    return Flow::Continue;
                }
            }
            if editor.input(key) {
                session.on_text_changed(&editor.snapshot());
            } else {
                session.on_caret_moved(&editor.snapshot());
            }
        }
        Event::Paste(text) => {
            editor.textarea_mut().insert_str(&text);
            session.on_text_changed(&editor.snapshot());
        }
        Event::Mouse(_) => session.on_caret_moved(&editor.snapshot()),
        Event::Resize(_, _) => session.on_viewport_changed(&editor.snapshot()),
        _ => {}
    }
    Flow::Continue
}

fn is_quit(key: &KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

fn is_accept(key: &KeyEvent, accept_key: AcceptKey) -> bool {
    let code = match accept_key {
        AcceptKey::Tab => KeyCode::Tab,
        AcceptKey::Right => KeyCode::Right,
    };
    key.code == code && key.modifiers == KeyModifiers::NONE
}

fn draw(
    terminal: &mut Tui,
    session: &CompletionSession<LatestOverlay>,
    editor: &TextAreaEditor,
    accept_key: AcceptKey,
) -> Result<()> {
    terminal
        .draw(|frame| {
            let [editor_area, status_area] =
                Layout::vertical([Constraint::Min(3), Constraint::Length(1)])
                    .areas(frame.area());

            let block = Block::default().borders(Borders::ALL).title(" ghostline ");
            let inner = block.inner(editor_area);
            frame.render_widget(block, editor_area);

            render_input_widget(
                frame,
                editor.textarea(),
                inner,
                PROMPT,
                session.renderer().overlay(),
            );
            frame.render_widget(
                StatusWidget::new(session.state().status(), accept_key),
                status_area,
            );
        })
        .context("Failed to draw frame")?;
    Ok(())
}
