//! Centered dialog overlay

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const MAX_WIDTH: u16 = 60;

/// Render the "form failed to load" dialog centered on the screen
pub fn render_error_dialog(frame: &mut Frame, error_message: &str) {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let hint = Line::from(vec![
        Span::raw("Press "),
        Span::styled("r", key_style),
        Span::raw(" to retry or "),
        Span::styled("Esc", key_style),
        Span::raw(" to quit"),
    ]);

    let title = "Failed to load form";
    let padding = 4u16; // 2 chars padding on each side
    let wrapped = wrap_text(error_message, (MAX_WIDTH - padding - 2) as usize);

    let content_width = wrapped
        .iter()
        .map(|l| l.chars().count())
        .chain([title.len(), hint.width()])
        .max()
        .unwrap_or(0) as u16;
    let width = (content_width + padding + 2).min(MAX_WIDTH);
    // title + blank + message + blank + hint + borders
    let height = wrapped.len() as u16 + 6;

    let area = frame.area();
    let dialog_area = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width: width.min(area.width),
        height: height.min(area.height),
    };

    let mut content = vec![
        Line::from(Span::styled(
            title,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    content.extend(wrapped.into_iter().map(Line::from));
    content.push(Line::from(""));
    content.push(hint);

    let dialog = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .style(Style::default().bg(Color::Black)),
    );

    frame.render_widget(Clear, dialog_area);
    frame.render_widget(dialog, dialog_area);
}

/// Greedy word wrap on whitespace, counting chars. Words longer than
/// `max_width` are hard-broken.
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let max_width = max_width.max(1);
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_len = 0;
        for word in paragraph.split_whitespace() {
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max_width) {
                let separator = usize::from(current_len > 0);
                if current_len + separator + piece.len() > max_width && current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                if current_len > 0 {
                    current.push(' ');
                    current_len += 1;
                }
                current.extend(piece);
                current_len += piece.len();
            }
        }
        lines.push(current);
    }
    lines
}
