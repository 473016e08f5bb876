//! Form configuration value objects

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Current value of every touched field, keyed by field name
pub type FormValues = HashMap<String, String>;

/// Kind of control a field renders as
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Dropdown {
        #[serde(default)]
        options: Vec<String>,
    },
}

/// A single field in a question group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Key the field's value is stored under
    pub name: String,
    pub label: String,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FieldDescriptor {
    /// Create a new text field
    pub fn text(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind: FieldKind::Text,
        }
    }

    /// Create a new dropdown field
    pub fn dropdown(name: &str, label: &str, options: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind: FieldKind::Dropdown {
                options: options.iter().map(|o| o.to_string()).collect(),
            },
        }
    }
}

/// A titled group of fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionGroup {
    pub title: String,
    pub fields: Vec<FieldDescriptor>,
}

/// Full form configuration as delivered by a config provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormConfig {
    #[serde(rename = "questions", alias = "groups")]
    pub groups: Vec<QuestionGroup>,
}

impl FormConfig {
    /// All fields across all groups, in display order
    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.groups.iter().flat_map(|g| g.fields.iter())
    }

    pub fn field_count(&self) -> usize {
        self.groups.iter().map(|g| g.fields.len()).sum()
    }

    /// Get a field by its flattened index
    pub fn field_at(&self, index: usize) -> Option<&FieldDescriptor> {
        self.fields().nth(index)
    }

    /// Names that appear on more than one field, each reported once in
    /// first-seen order
    pub fn duplicate_names(&self) -> Vec<String> {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        let mut duplicates = Vec::new();
        for field in self.fields() {
            let count = seen.entry(field.name.as_str()).or_insert(0);
            *count += 1;
            if *count == 2 {
                duplicates.push(field.name.clone());
            }
        }
        duplicates
    }
}
