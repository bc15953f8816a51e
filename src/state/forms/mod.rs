//! Form domain layer
//!
//! UI-independent form handling: field values, the state store and the
//! dynamic list manager.

mod field;
mod form_state;
mod hobbies;

pub use field::{FieldPath, FieldValue, FormField, FormValues, HobbyEntry, HobbyLevel};
pub use form_state::FormStore;
