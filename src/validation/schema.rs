//! Schema definitions: ordered field paths mapped to ordered rule lists

use super::rule::Rule;
use crate::state::FieldPath;

/// Rules for one field, or for every entry of a list field
#[derive(Debug, Clone)]
pub enum SchemaEntry {
    Field {
        name: String,
        rules: Vec<Rule>,
    },
    List {
        name: String,
        /// Sub-field name and its rules, applied to each entry independently
        item: Vec<(String, Vec<Rule>)>,
    },
}

/// Declarative set of per-field rules, kept in declaration order
#[derive(Debug, Clone, Default)]
pub struct Schema {
    entries: Vec<SchemaEntry>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field and its rules
    pub fn field(mut self, name: &str, rules: Vec<Rule>) -> Self {
        self.entries.push(SchemaEntry::Field {
            name: name.to_string(),
            rules,
        });
        self
    }

    /// Declare a list field whose entries are validated one by one
    pub fn list(mut self, name: &str, item: Vec<(&str, Vec<Rule>)>) -> Self {
        self.entries.push(SchemaEntry::List {
            name: name.to_string(),
            item: item
                .into_iter()
                .map(|(field, rules)| (field.to_string(), rules))
                .collect(),
        });
        self
    }

    pub fn entries(&self) -> &[SchemaEntry] {
        &self.entries
    }

    /// Rules declared for a top-level field
    pub fn rules_for(&self, name: &str) -> Option<&[Rule]> {
        self.entries.iter().find_map(|entry| match entry {
            SchemaEntry::Field { name: n, rules } if n == name => Some(rules.as_slice()),
            _ => None,
        })
    }

    /// Whether `path` addresses something this schema declares
    pub fn declares(&self, path: &FieldPath) -> bool {
        self.entries.iter().any(|entry| match (entry, path) {
            (SchemaEntry::Field { name, .. }, FieldPath::Field(field)) => name == field,
            (SchemaEntry::List { name, item }, FieldPath::Item { list, field, .. }) => {
                name == list && item.iter().any(|(sub, _)| sub == field)
            }
            _ => false,
        })
    }

    /// Whether any rule needs to suspend
    pub fn has_async_rules(&self) -> bool {
        self.entries.iter().any(|entry| match entry {
            SchemaEntry::Field { rules, .. } => rules.iter().any(Rule::is_async),
            SchemaEntry::List { item, .. } => {
                item.iter().any(|(_, rules)| rules.iter().any(Rule::is_async))
            }
        })
    }
}
