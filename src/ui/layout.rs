//! Layout components (main area, status bar)

use crate::app::App;
use crate::platform::SUBMIT_SHORTCUT;
use crate::state::LoadState;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into the content area and a one-line status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Key hints for the current state
fn get_hints(app: &App) -> String {
    match &app.state.load {
        LoadState::Loading => " Esc: quit".to_string(),
        LoadState::Failed(_) => " r: retry | Esc: quit".to_string(),
        LoadState::Ready(_) if app.state.cursor.is_on_submit() => {
            " Tab/↑↓: move | Enter: submit | Esc: quit".to_string()
        }
        LoadState::Ready(_) => {
            format!(" Tab/↑↓: move | ←→: choose | {SUBMIT_SHORTCUT}: submit | Esc: quit")
        }
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        get_hints(app),
        Style::default().fg(Color::White),
    )];

    if app.state.submissions > 0 {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            format!("Submitted: {}", app.state.submissions),
            Style::default().fg(Color::Green),
        ));
    }

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg.as_str(), Style::default().fg(Color::Yellow)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);
}
