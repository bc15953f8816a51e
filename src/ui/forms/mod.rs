//! Form rendering module
//!
//! - `field_renderer`: Field rendering utilities
//! - `registration_form`: The registration form and its hobby rows

mod field_renderer;
mod registration_form;

pub use registration_form::draw_registration;
