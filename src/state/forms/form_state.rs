//! Form state store: values, dirty/touched flags, errors

use super::field::{FieldValue, FormValues};
use crate::validation::ValidationErrors;
use std::collections::BTreeSet;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Unknown field: {0}")]
    UnknownField(String),
    #[error("Field is not registered: {0}")]
    NotRegistered(String),
    #[error("Value for {0} does not match the field type")]
    TypeMismatch(String),
    #[error("Index {index} out of range for {list} (len {len})")]
    IndexOutOfRange {
        list: String,
        index: usize,
        len: usize,
    },
}

pub type FormResult<T> = Result<T, FormError>;

/// Holds the live state of one form session
#[derive(Debug, Clone, Default)]
pub struct FormStore {
    defaults: FormValues,
    values: FormValues,
    /// Registered field names, in registration order
    registered: Vec<String>,
    dirty: BTreeSet<String>,
    touched: BTreeSet<String>,
    errors: ValidationErrors,
    /// Error not tied to any field (failed submission)
    global_error: Option<String>,
    submit_count: u32,
}

impl FormStore {
    /// Create a store whose values start at `defaults`
    pub fn new(defaults: FormValues) -> Self {
        Self {
            values: defaults.clone(),
            defaults,
            ..Self::default()
        }
    }

    /// Bind a field to the store. Registering twice is a no-op.
    pub fn register(&mut self, name: &str) -> FormResult<()> {
        if !self.defaults.contains(name) {
            return Err(FormError::UnknownField(name.to_string()));
        }
        if !self.is_registered(name) {
            self.registered.push(name.to_string());
        }
        Ok(())
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.registered.iter().any(|n| n == name)
    }

    /// Replace a field value. Last write wins.
    pub fn set_value(&mut self, name: &str, value: impl Into<FieldValue>) -> FormResult<()> {
        let value = value.into();
        let default = self
            .defaults
            .get(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        if !self.is_registered(name) {
            return Err(FormError::NotRegistered(name.to_string()));
        }
        if !default.same_shape(&value) {
            return Err(FormError::TypeMismatch(name.to_string()));
        }

        let is_dirty = default != &value;
        self.values.insert(name, value);
        self.mark_dirty(name, is_dirty);
        Ok(())
    }

    /// Edit a field value in place
    pub fn update(&mut self, name: &str, f: impl FnOnce(&mut FieldValue)) -> FormResult<()> {
        let mut value = self
            .values
            .get(name)
            .cloned()
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        f(&mut value);
        self.set_value(name, value)
    }

    fn mark_dirty(&mut self, name: &str, is_dirty: bool) {
        if is_dirty {
            self.dirty.insert(name.to_string());
        } else {
            self.dirty.remove(name);
        }
    }

    /// Mark a field as visited
    pub fn touch(&mut self, name: &str) {
        if self.is_registered(name) {
            self.touched.insert(name.to_string());
        }
    }

    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// Copy of the current values, detached from further edits
    pub fn snapshot(&self) -> FormValues {
        self.values.clone()
    }

    pub fn is_dirty(&self, name: &str) -> bool {
        self.dirty.contains(name)
    }

    pub fn is_form_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    pub fn is_touched(&self, name: &str) -> bool {
        self.touched.contains(name)
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub(crate) fn errors_mut(&mut self) -> &mut ValidationErrors {
        &mut self.errors
    }

    /// Replace the whole error mapping with the result of a validation pass
    pub fn set_errors(&mut self, errors: ValidationErrors) {
        self.errors = errors;
    }

    pub fn global_error(&self) -> Option<&str> {
        self.global_error.as_deref()
    }

    pub fn set_global_error(&mut self, message: impl Into<String>) {
        self.global_error = Some(message.into());
    }

    pub fn clear_global_error(&mut self) {
        self.global_error = None;
    }

    pub fn submit_count(&self) -> u32 {
        self.submit_count
    }

    pub fn record_submit_attempt(&mut self) {
        self.submit_count += 1;
    }

    /// Restore every field to `defaults` and clear all flags and errors.
    ///
    /// The new state is built first and swapped in, so no caller can observe a
    /// partially reset store. Registrations survive the reset.
    pub fn reset(&mut self, defaults: FormValues) {
        let registered = std::mem::take(&mut self.registered)
            .into_iter()
            .filter(|name| defaults.contains(name))
            .collect();
        *self = Self {
            registered,
            ..Self::new(defaults)
        };
    }

    /// Reset to the defaults the store was created with
    pub fn reset_to_defaults(&mut self) {
        let defaults = self.defaults.clone();
        self.reset(defaults);
    }
}
