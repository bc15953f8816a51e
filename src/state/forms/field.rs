//! Form field value objects

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Type-safe field values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    List(Vec<HobbyEntry>),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

impl FieldValue {
    /// Get the text value (returns empty string for non-text values)
    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::Flag(_) | FieldValue::List(_) => "",
        }
    }

    /// Get the flag value (returns false for non-flag values)
    pub fn as_flag(&self) -> bool {
        match self {
            FieldValue::Flag(b) => *b,
            FieldValue::Text(_) | FieldValue::List(_) => false,
        }
    }

    /// Get the list entries (returns an empty slice for scalar values)
    pub fn as_list(&self) -> &[HobbyEntry] {
        match self {
            FieldValue::List(entries) => entries,
            FieldValue::Text(_) | FieldValue::Flag(_) => &[],
        }
    }

    /// Whether the value counts as "not filled in".
    ///
    /// Text is trimmed, an unchecked flag is empty, and so is a list without entries.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Flag(b) => !b,
            FieldValue::List(entries) => entries.is_empty(),
        }
    }

    /// True when both values are the same variant
    pub fn same_shape(&self, other: &FieldValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Length used by min-length rules: characters for text, entries for lists
    pub fn length(&self) -> usize {
        match self {
            FieldValue::Text(s) => s.chars().count(),
            FieldValue::Flag(_) => 0,
            FieldValue::List(entries) => entries.len(),
        }
    }

    /// Push a character to a text value
    pub fn push_char(&mut self, c: char) {
        if let FieldValue::Text(s) = self {
            s.push(c);
        }
    }

    /// Remove the last character from a text value
    pub fn pop_char(&mut self) {
        if let FieldValue::Text(s) = self {
            s.pop();
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

/// Skill level attached to a hobby
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HobbyLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl HobbyLevel {
    /// Wire name, as sent in the submission body
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Beginner => "Débutant",
            Self::Intermediate => "Intermédiaire",
            Self::Advanced => "Avancé",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Beginner => Self::Intermediate,
            Self::Intermediate => Self::Advanced,
            Self::Advanced => Self::Beginner,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::Beginner => Self::Advanced,
            Self::Intermediate => Self::Beginner,
            Self::Advanced => Self::Intermediate,
        }
    }
}

/// One row of the hobbies list
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HobbyEntry {
    pub value: String,
    pub level: HobbyLevel,
}

impl HobbyEntry {
    pub fn new(value: impl Into<String>, level: HobbyLevel) -> Self {
        Self {
            value: value.into(),
            level,
        }
    }

    /// Read a sub-field as a plain value so item rules can run against it
    pub fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "value" => Some(FieldValue::Text(self.value.clone())),
            "level" => Some(FieldValue::Text(self.level.as_str().to_string())),
            _ => None,
        }
    }
}

/// Snapshot of every field value, keyed by field name
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues(BTreeMap<String, FieldValue>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for declaring defaults
    pub fn with(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<FieldValue>) {
        self.0.insert(name.to_string(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Text value of a field, empty when missing or not text
    pub fn text(&self, name: &str) -> &str {
        self.get(name).map(FieldValue::as_text).unwrap_or("")
    }

    /// List entries of a field, empty when missing or not a list
    pub fn list(&self, name: &str) -> &[HobbyEntry] {
        self.get(name).map(FieldValue::as_list).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.0.iter()
    }
}

impl From<Vec<HobbyEntry>> for FieldValue {
    fn from(entries: Vec<HobbyEntry>) -> Self {
        FieldValue::List(entries)
    }
}

/// Address of a field, including entries of a dynamic list
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldPath {
    Field(String),
    Item {
        list: String,
        index: usize,
        field: String,
    },
}

impl FieldPath {
    pub fn field(name: &str) -> Self {
        FieldPath::Field(name.to_string())
    }

    pub fn item(list: &str, index: usize, field: &str) -> Self {
        FieldPath::Item {
            list: list.to_string(),
            index,
            field: field.to_string(),
        }
    }

    /// Index inside `list`, if this path points into that list
    pub fn list_index(&self, list_name: &str) -> Option<usize> {
        match self {
            FieldPath::Item { list, index, .. } if list == list_name => Some(*index),
            _ => None,
        }
    }

    /// Name of the top-level field (the list name for list items)
    pub fn root(&self) -> &str {
        match self {
            FieldPath::Field(name) => name,
            FieldPath::Item { list, .. } => list,
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Field(name) => write!(f, "{name}"),
            FieldPath::Item { list, index, field } => write!(f, "{list}[{index}].{field}"),
        }
    }
}

/// How an input is presented and edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Text input whose content is masked on screen
    Secret,
    /// One value out of a fixed set of `(value, label)` pairs
    Choice(&'static [(&'static str, &'static str)]),
    Checkbox,
}

/// Describes a single form input: which value it edits and how it looks
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
}

impl FormField {
    /// Create a new text field
    pub fn text(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind: FieldKind::Text,
        }
    }

    /// Create a new masked text field
    pub fn secret(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind: FieldKind::Secret,
        }
    }

    /// Create a new choice field
    pub fn choice(
        name: &str,
        label: &str,
        options: &'static [(&'static str, &'static str)],
    ) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind: FieldKind::Choice(options),
        }
    }

    /// Create a new checkbox field
    pub fn checkbox(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind: FieldKind::Checkbox,
        }
    }

    /// Whether typed characters go into this field
    pub fn accepts_text(&self) -> bool {
        matches!(self.kind, FieldKind::Text | FieldKind::Secret)
    }

    /// Next value when the field is toggled (choices cycle, checkboxes flip)
    pub fn toggled(&self, current: &FieldValue, forward: bool) -> Option<FieldValue> {
        match self.kind {
            FieldKind::Checkbox => Some(FieldValue::Flag(!current.as_flag())),
            FieldKind::Choice(options) if !options.is_empty() => {
                let pos = options
                    .iter()
                    .position(|(value, _)| *value == current.as_text())
                    .unwrap_or(0);
                let next = if forward {
                    (pos + 1) % options.len()
                } else {
                    (pos + options.len() - 1) % options.len()
                };
                Some(FieldValue::Text(options[next].0.to_string()))
            }
            _ => None,
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self, value: &FieldValue) -> String {
        match self.kind {
            FieldKind::Text => value.as_text().to_string(),
            FieldKind::Secret => "•".repeat(value.length()),
            FieldKind::Choice(options) => options
                .iter()
                .map(|(v, label)| {
                    if *v == value.as_text() {
                        format!("(•) {label}")
                    } else {
                        format!("( ) {label}")
                    }
                })
                .collect::<Vec<_>>()
                .join("   "),
            FieldKind::Checkbox => {
                if value.as_flag() {
                    "[x]".to_string()
                } else {
                    "[ ]".to_string()
                }
            }
        }
    }
}
