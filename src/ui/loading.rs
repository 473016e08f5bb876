//! Loading screen shown while the form configuration is fetched

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Draw the centered "Loading..." text
pub fn draw(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled("Loading...", Style::default().fg(Color::Cyan))),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc to quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let height = lines.len() as u16;
    let text_area = Rect {
        y: area.y + area.height.saturating_sub(height) / 2,
        height: height.min(area.height),
        ..area
    };
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        text_area,
    );
}
