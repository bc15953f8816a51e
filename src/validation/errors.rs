//! Per-field validation errors

use crate::state::FieldPath;
use std::collections::BTreeMap;

/// What kind of rule produced an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A rule on the field's own value
    Field,
    /// A rule comparing the field with a sibling
    CrossField,
    /// A requirement that only applies under a condition
    Conditional,
    /// A remote check that could not be carried out
    Unavailable,
}

/// A failed rule, attached to one field path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub kind: ErrorKind,
    pub message: String,
}

impl FieldError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Field path to error mapping produced by one validation pass
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors(BTreeMap<FieldPath, FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: FieldPath, error: FieldError) {
        self.0.insert(path, error);
    }

    pub fn get(&self, path: &FieldPath) -> Option<&FieldError> {
        self.0.get(path)
    }

    /// Message for a top-level field
    pub fn message(&self, name: &str) -> Option<&str> {
        self.0
            .get(&FieldPath::field(name))
            .map(|e| e.message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldPath, &FieldError)> {
        self.0.iter()
    }

    /// Any error on an entry of `list` at `index`
    pub fn has_item_error(&self, list: &str, index: usize) -> bool {
        self.0.keys().any(|p| p.list_index(list) == Some(index))
    }

    /// Drop the errors of a removed list entry and close the gap
    ///
    /// Errors of later entries move down by one index so they stay attached
    /// to the same entry after removal.
    pub fn remove_list_item(&mut self, list: &str, removed: usize) {
        let entries = std::mem::take(&mut self.0);
        self.0 = entries
            .into_iter()
            .filter_map(|(path, error)| match path {
                FieldPath::Item {
                    list: name,
                    index,
                    field,
                } if name == list => {
                    if index == removed {
                        None
                    } else if index > removed {
                        Some((
                            FieldPath::Item {
                                list: name,
                                index: index - 1,
                                field,
                            },
                            error,
                        ))
                    } else {
                        Some((FieldPath::Item { list: name, index, field }, error))
                    }
                }
                other => Some((other, error)),
            })
            .collect();
    }
}

impl FromIterator<(FieldPath, FieldError)> for ValidationErrors {
    fn from_iter<T: IntoIterator<Item = (FieldPath, FieldError)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn err(message: &str) -> FieldError {
        FieldError::new(ErrorKind::Field, message)
    }

    #[test]
    fn test_message_reads_top_level_field() {
        let mut errors = ValidationErrors::new();
        errors.insert(FieldPath::field("lastname"), err("Le nom est trop court"));
        assert_eq!(errors.message("lastname"), Some("Le nom est trop court"));
        assert_eq!(errors.message("firstname"), None);
    }

    #[test]
    fn test_remove_list_item_shifts_later_entries() {
        let mut errors: ValidationErrors = [
            (FieldPath::field("lastname"), err("a")),
            (FieldPath::item("hobbies", 0, "value"), err("zero")),
            (FieldPath::item("hobbies", 1, "value"), err("one")),
            (FieldPath::item("hobbies", 2, "level"), err("two")),
        ]
        .into_iter()
        .collect();

        errors.remove_list_item("hobbies", 1);

        let keys: Vec<String> = errors.iter().map(|(p, _)| p.to_string()).collect();
        assert_eq!(keys, vec!["lastname", "hobbies[0].value", "hobbies[1].level"]);
        assert_eq!(
            errors
                .get(&FieldPath::item("hobbies", 1, "level"))
                .map(|e| e.message.as_str()),
            Some("two")
        );
    }

    #[test]
    fn test_remove_list_item_ignores_other_lists() {
        let mut errors: ValidationErrors = [(FieldPath::item("pets", 0, "name"), err("x"))]
            .into_iter()
            .collect();
        errors.remove_list_item("hobbies", 0);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_has_item_error() {
        let errors: ValidationErrors = [(FieldPath::item("hobbies", 3, "value"), err("x"))]
            .into_iter()
            .collect();
        assert!(errors.has_item_error("hobbies", 3));
        assert!(!errors.has_item_error("hobbies", 0));
    }
}
