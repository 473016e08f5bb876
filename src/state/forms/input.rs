//! Keyboard input for form fields: focus movement and per-field edits

use super::field::{FieldDescriptor, FieldKind};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Focus position within a form.
///
/// Positions `0..field_count` are fields in display order, `field_count` is
/// the submit button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormCursor {
    active: usize,
    field_count: usize,
}

impl FormCursor {
    pub fn new(field_count: usize) -> Self {
        Self {
            active: 0,
            field_count,
        }
    }

    fn positions(&self) -> usize {
        self.field_count + 1
    }

    #[cfg(test)]
    pub fn active(&self) -> usize {
        self.active
    }

    /// Index of the focused field, `None` when the submit button is focused
    pub fn active_field(&self) -> Option<usize> {
        (self.active < self.field_count).then_some(self.active)
    }

    pub fn is_on_submit(&self) -> bool {
        self.active == self.field_count
    }

    pub fn set_active(&mut self, index: usize) {
        self.active = index.min(self.field_count);
    }

    pub fn next(&mut self) {
        self.active = (self.active + 1) % self.positions();
    }

    pub fn prev(&mut self) {
        if self.active == 0 {
            self.active = self.positions() - 1;
        } else {
            self.active -= 1;
        }
    }
}

/// Map a key press on `field` to its new value.
///
/// Returns `None` when the key does not change the value, so every `Some` is
/// exactly one edit event.
pub fn edit_for_key(field: &FieldDescriptor, current: &str, key: KeyEvent) -> Option<String> {
    match &field.kind {
        FieldKind::Text => text_edit(current, key),
        FieldKind::Dropdown { options } => dropdown_edit(options, current, key),
    }
}

fn text_edit(current: &str, key: KeyEvent) -> Option<String> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('u') if ctrl => (!current.is_empty()).then(String::new),
        KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
            let mut value = current.to_string();
            value.push(c);
            Some(value)
        }
        KeyCode::Backspace => {
            let mut value = current.to_string();
            value.pop().map(|_| value)
        }
        _ => None,
    }
}

fn dropdown_edit(options: &[String], current: &str, key: KeyEvent) -> Option<String> {
    // Slot 0 is the empty "Select ..." placeholder
    let slots = options.len() + 1;
    let position = options
        .iter()
        .position(|o| o == current)
        .map(|i| i + 1)
        .unwrap_or(0);

    let next = match key.code {
        KeyCode::Right | KeyCode::Char(' ') | KeyCode::Char('l') => (position + 1) % slots,
        KeyCode::Left | KeyCode::Char('h') => (position + slots - 1) % slots,
        KeyCode::Backspace | KeyCode::Delete => 0,
        _ => return None,
    };

    let value = if next == 0 {
        String::new()
    } else {
        options[next - 1].clone()
    };
    (value != current).then_some(value)
}
