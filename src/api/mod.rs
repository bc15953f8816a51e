//! HTTP client for the remote check and the user-creation endpoint

mod client;
mod traits;
mod yes_no;

pub use client::{ApiClient, ApiError, CreatedUser};
pub use traits::ApiClientTrait;
pub use yes_no::YesNoGate;

#[cfg(test)]
pub use client::{Answer, YesNoAnswer};
#[cfg(test)]
pub use traits::MockApiClientTrait;
