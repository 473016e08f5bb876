//! Form view: question groups, their fields and the submit button

use super::field_renderer::{draw_field, FIELD_HEIGHT};
use crate::state::{FieldDescriptor, FormConfig, FormCursor, FormEngine, TransientFlag};
use crate::ui::components::{render_button, ButtonTone, BUTTON_HEIGHT};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// One vertical slot in the form layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Row<'a> {
    GroupTitle(&'a str),
    Field(usize, &'a FieldDescriptor),
    Submit,
}

impl Row<'_> {
    fn height(&self) -> u16 {
        match self {
            Row::GroupTitle(_) => 2,
            Row::Field(..) => FIELD_HEIGHT,
            Row::Submit => BUTTON_HEIGHT,
        }
    }
}

fn build_rows(config: &FormConfig) -> Vec<Row<'_>> {
    let mut rows = Vec::new();
    let mut index = 0;
    for group in &config.groups {
        rows.push(Row::GroupTitle(&group.title));
        for field in &group.fields {
            rows.push(Row::Field(index, field));
            index += 1;
        }
    }
    rows.push(Row::Submit);
    rows
}

/// Row index of the focused field or button
fn focused_row(rows: &[Row], cursor: &FormCursor) -> usize {
    rows.iter()
        .position(|row| match (row, cursor.active_field()) {
            (Row::Field(index, _), Some(active)) => *index == active,
            (Row::Submit, None) => true,
            _ => false,
        })
        .unwrap_or(0)
}

/// First row to draw so that the focused row fits in `height`. Includes the
/// group title directly above the focused row when there is room.
fn first_visible_row(rows: &[Row], focused: usize, height: u16) -> usize {
    let mut first = focused;
    let mut used = rows[focused].height();
    while first > 0 {
        let above = rows[first - 1].height();
        if used + above > height {
            break;
        }
        used += above;
        first -= 1;
    }

    // Prefer showing from the top when everything up to the focus fits
    let fits_from_top: u16 = rows[..=focused].iter().map(Row::height).sum();
    if fits_from_top <= height {
        0
    } else {
        first
    }
}

/// Draw the loaded form
pub fn draw_form(frame: &mut Frame, area: Rect, engine: &FormEngine, cursor: &FormCursor) {
    let block = Block::default()
        .title(" Form ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let inner = Rect {
        x: inner.x + 1,
        width: inner.width.saturating_sub(2),
        ..inner
    };

    let rows = build_rows(engine.config());
    let focused = focused_row(&rows, cursor);
    let first = first_visible_row(&rows, focused, inner.height);

    let mut y = inner.y;
    let bottom = inner.y + inner.height;
    for row in &rows[first..] {
        let height = row.height();
        if y + height > bottom {
            break;
        }
        let row_area = Rect {
            y,
            height,
            ..inner
        };
        match row {
            Row::GroupTitle(title) => draw_group_title(frame, row_area, title),
            Row::Field(index, field) => draw_field(
                frame,
                row_area,
                field,
                engine.value(&field.name),
                cursor.active_field() == Some(*index),
            ),
            Row::Submit => draw_submit(frame, row_area, engine.flag(), cursor.is_on_submit()),
        }
        y += height;
    }
}

fn draw_group_title(frame: &mut Frame, area: Rect, title: &str) {
    let line = Line::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_submit(frame: &mut Frame, area: Rect, flag: TransientFlag, is_selected: bool) {
    let tone = match flag {
        TransientFlag::None => ButtonTone::Normal,
        TransientFlag::Success => ButtonTone::Success,
        TransientFlag::Error => ButtonTone::Error,
    };
    render_button(
        frame,
        area,
        flag.message().unwrap_or("Submit"),
        is_selected,
        tone,
    );
}
