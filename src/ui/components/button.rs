//! Button component for TUI

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Colour scheme of a button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonTone {
    Normal,
    Success,
    Error,
}

/// Render a full-width bordered button.
///
/// Success and error tones render as disabled: they carry a message rather
/// than an action.
pub fn render_button(
    frame: &mut Frame,
    area: Rect,
    content: &str,
    is_selected: bool,
    tone: ButtonTone,
) {
    let accent = match tone {
        ButtonTone::Normal => Color::Cyan,
        ButtonTone::Success => Color::Green,
        ButtonTone::Error => Color::Red,
    };

    let border_style = if is_selected || tone != ButtonTone::Normal {
        Style::default().fg(accent)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let text_style = match tone {
        ButtonTone::Normal if is_selected => Style::default()
            .fg(accent)
            .add_modifier(Modifier::BOLD),
        ButtonTone::Normal => Style::default(),
        ButtonTone::Success | ButtonTone::Error => Style::default()
            .fg(Color::White)
            .bg(accent)
            .add_modifier(Modifier::BOLD),
    };

    let paragraph = Paragraph::new(format!(" {content} "))
        .style(text_style)
        .alignment(Alignment::Center);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.block(block), area);
}
