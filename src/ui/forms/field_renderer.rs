//! Field rendering for forms

use crate::state::{FieldDescriptor, FieldKind};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows taken by one rendered field
pub const FIELD_HEIGHT: u16 = 3;

/// Draw one field with its current value
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FieldDescriptor,
    value: &str,
    is_active: bool,
) {
    let border_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let content = match &field.kind {
        FieldKind::Text => text_line(value, is_active),
        FieldKind::Dropdown { options } => dropdown_line(&field.label, options, value, is_active),
    };

    let block = Block::default()
        .title(format!(" {} ", field.label))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(Paragraph::new(content).block(block), area);
}

fn text_line(value: &str, is_active: bool) -> Line<'static> {
    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    if value.is_empty() && !is_active {
        return Line::from(Span::styled("(empty)", style));
    }

    let mut spans = vec![Span::styled(value.to_string(), style)];
    if is_active {
        spans.push(Span::styled("▌", Style::default().fg(Color::Cyan)));
    }
    Line::from(spans)
}

fn dropdown_line(label: &str, options: &[String], value: &str, is_active: bool) -> Line<'static> {
    let (text, style) = if value.is_empty() {
        (
            format!("Select {label}"),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )
    } else if is_active {
        (value.to_string(), Style::default().fg(Color::Cyan))
    } else {
        (value.to_string(), Style::default())
    };

    if !is_active {
        return Line::from(Span::styled(text, style));
    }

    let arrow = Style::default().fg(Color::Cyan);
    let position = options
        .iter()
        .position(|o| o == value)
        .map(|i| format!("  ({}/{})", i + 1, options.len()))
        .unwrap_or_default();
    Line::from(vec![
        Span::styled("◀ ", arrow),
        Span::styled(text, style),
        Span::styled(" ▶", arrow),
        Span::styled(position, Style::default().fg(Color::DarkGray)),
    ])
}
