//! Trait abstraction for the API client to enable mocking in tests

use super::client::{ApiError, CreatedUser, YesNoAnswer};
use crate::state::FormValues;
use async_trait::async_trait;

/// Outbound calls the form makes, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApiClientTrait: Send + Sync {
    /// Ask the random yes/no endpoint for an answer
    async fn ask_yes_no(&self) -> Result<YesNoAnswer, ApiError>;

    /// Post the form values to the user-creation endpoint
    async fn create_user(&self, values: &FormValues) -> Result<CreatedUser, ApiError>;
}
