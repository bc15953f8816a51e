//! Schema-driven validation
//!
//! Rules are plain data grouped into a [`Schema`]; the [`Validator`] runs
//! them against a snapshot and yields [`ValidationErrors`] keyed by field path.

mod engine;
mod errors;
mod rule;
mod schema;

pub use engine::{RemoteFailurePolicy, ValidationMode, Validator};
pub use errors::ValidationErrors;
pub use rule::{AsyncPredicate, Rule};
pub use schema::Schema;

#[cfg(test)]
pub use engine::{Validation, UNAVAILABLE_MESSAGE};
#[cfg(test)]
pub use errors::{ErrorKind, FieldError};
