//! Submission handler
//!
//! `Idle -> Submitting -> Idle`. A submission validates a snapshot first and
//! only reaches the network when every rule passed. On success the store
//! resets to its defaults; on failure the error goes to the store's global
//! slot, which stays set until the next attempt clears it.

use crate::api::{ApiClientTrait, CreatedUser};
use crate::state::FormStore;
use crate::validation::{Schema, ValidationMode, Validator};
use std::sync::Arc;

/// Message shown in the global error slot when the POST fails
pub const SUBMIT_FAILED_MESSAGE: &str = "L'inscription a échoué";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// A submission is already running
    ///
    /// `App` never queues a second submit while one is pending, so this only
    /// guards direct callers of [`Submitter::submit`].
    Busy,
    /// Validation failed with this many errors; nothing was sent
    Invalid(usize),
    /// The server accepted the form and the store was reset
    Created(CreatedUser),
    /// The request failed; the message is in the store's global error
    Failed(String),
}

pub struct Submitter {
    client: Arc<dyn ApiClientTrait>,
    validator: Validator,
    status: SubmissionStatus,
}

impl Submitter {
    pub fn new(client: Arc<dyn ApiClientTrait>, validator: Validator) -> Self {
        Self {
            client,
            validator,
            status: SubmissionStatus::Idle,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.status == SubmissionStatus::Submitting
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Validate the store and, when valid, send it
    pub async fn submit(&mut self, store: &mut FormStore, schema: &Schema) -> SubmitOutcome {
        if self.is_submitting() {
            return SubmitOutcome::Busy;
        }

        store.clear_global_error();
        store.record_submit_attempt();

        let snapshot = store.snapshot();
        let validation = self
            .validator
            .validate(schema, &snapshot, ValidationMode::Full)
            .await;
        debug_assert!(validation.errors.iter().all(|(path, _)| schema.declares(path)));
        let valid = validation.is_valid();
        let error_count = validation.errors.len();
        store.set_errors(validation.errors);
        if !valid {
            tracing::info!("Submission blocked by {error_count} validation error(s)");
            return SubmitOutcome::Invalid(error_count);
        }

        self.status = SubmissionStatus::Submitting;
        let result = self.client.create_user(&snapshot).await;
        self.status = SubmissionStatus::Idle;

        match result {
            Ok(user) => {
                tracing::info!(
                    "User created with id {} at {:?}",
                    user.display_id(),
                    user.created_at
                );
                store.reset_to_defaults();
                SubmitOutcome::Created(user)
            }
            Err(e) => {
                tracing::error!("Submission failed: {e}");
                let message = format!("{SUBMIT_FAILED_MESSAGE} : {e}");
                store.set_global_error(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }
}
