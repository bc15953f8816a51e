//! Remote yes/no gate usable as an async validation rule

use super::client::ApiError;
use super::traits::ApiClientTrait;
use crate::state::FieldValue;
use crate::validation::AsyncPredicate;
use async_trait::async_trait;
use std::sync::Arc;

/// Passes a field when the yes/no endpoint answers "yes".
///
/// The endpoint takes no parameters, so the field value itself is ignored.
pub struct YesNoGate {
    client: Arc<dyn ApiClientTrait>,
}

impl YesNoGate {
    pub fn new(client: Arc<dyn ApiClientTrait>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AsyncPredicate for YesNoGate {
    async fn check(&self, _value: &FieldValue) -> Result<bool, ApiError> {
        Ok(self.client.ask_yes_no().await?.is_yes())
    }
}
