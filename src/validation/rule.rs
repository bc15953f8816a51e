//! Validation rules as data

use super::errors::ErrorKind;
use crate::api::ApiError;
use crate::state::{FieldValue, FormValues};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// A yes/no check that needs to suspend, such as a remote lookup
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AsyncPredicate: Send + Sync {
    /// `Ok(true)` when `value` is acceptable
    async fn check(&self, value: &FieldValue) -> Result<bool, ApiError>;
}

/// One validation rule and the message shown when it fails
#[derive(Clone)]
pub enum Rule {
    /// Text must be non-blank, a flag must be checked, a list non-empty
    Required { message: String },
    /// At least `len` characters; empty values are left to `Required`
    MinLength { len: usize, message: String },
    /// Must equal the sibling field `other`
    Equals { other: String, message: String },
    /// Text must be one of `values`
    OneOf { values: Vec<String>, message: String },
    Async {
        predicate: Arc<dyn AsyncPredicate>,
        message: String,
    },
    /// `Required`, but only while sibling `field` holds the text `equals`
    RequiredWhen {
        field: String,
        equals: String,
        message: String,
    },
}

impl Rule {
    pub fn required(message: &str) -> Self {
        Rule::Required {
            message: message.to_string(),
        }
    }

    pub fn min_length(len: usize, message: &str) -> Self {
        Rule::MinLength {
            len,
            message: message.to_string(),
        }
    }

    pub fn equals(other: &str, message: &str) -> Self {
        Rule::Equals {
            other: other.to_string(),
            message: message.to_string(),
        }
    }

    pub fn one_of(values: &[&str], message: &str) -> Self {
        Rule::OneOf {
            values: values.iter().map(|v| v.to_string()).collect(),
            message: message.to_string(),
        }
    }

    pub fn remote(predicate: Arc<dyn AsyncPredicate>, message: &str) -> Self {
        Rule::Async {
            predicate,
            message: message.to_string(),
        }
    }

    pub fn required_when(field: &str, equals: &str, message: &str) -> Self {
        Rule::RequiredWhen {
            field: field.to_string(),
            equals: equals.to_string(),
            message: message.to_string(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Rule::Required { message }
            | Rule::MinLength { message, .. }
            | Rule::Equals { message, .. }
            | Rule::OneOf { message, .. }
            | Rule::Async { message, .. }
            | Rule::RequiredWhen { message, .. } => message,
        }
    }

    /// Error kind recorded when this rule fails
    pub fn kind(&self) -> ErrorKind {
        match self {
            Rule::Equals { .. } => ErrorKind::CrossField,
            Rule::RequiredWhen { .. } => ErrorKind::Conditional,
            Rule::Required { .. }
            | Rule::MinLength { .. }
            | Rule::OneOf { .. }
            | Rule::Async { .. } => ErrorKind::Field,
        }
    }

    pub fn is_async(&self) -> bool {
        matches!(self, Rule::Async { .. })
    }

    /// Evaluate a synchronous rule. Returns `None` for async rules.
    ///
    /// `siblings` supplies the other fields for cross-field rules.
    pub fn check_sync(&self, value: &FieldValue, siblings: &FormValues) -> Option<bool> {
        let passed = match self {
            Rule::Required { .. } => !value.is_blank(),
            Rule::MinLength { len, .. } => value.is_blank() || value.length() >= *len,
            Rule::Equals { other, .. } => siblings.get(other) == Some(value),
            Rule::OneOf { values, .. } => values.iter().any(|v| v == value.as_text()),
            Rule::RequiredWhen { field, equals, .. } => {
                siblings.text(field) != equals || !value.is_blank()
            }
            Rule::Async { .. } => return None,
        };
        Some(passed)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Required { .. } => write!(f, "Required"),
            Rule::MinLength { len, .. } => write!(f, "MinLength({len})"),
            Rule::Equals { other, .. } => write!(f, "Equals({other})"),
            Rule::OneOf { values, .. } => write!(f, "OneOf({values:?})"),
            Rule::Async { .. } => write!(f, "Async"),
            Rule::RequiredWhen { field, equals, .. } => {
                write!(f, "RequiredWhen({field} == {equals:?})")
            }
        }
    }
}
