//! Validation engine
//!
//! Runs a [`Schema`] against a snapshot of form values. Each field's rules
//! are evaluated in declaration order and evaluation stops at the first
//! failure, so a field carries at most one error. Async rules are awaited in
//! place; the engine only returns once every rule has resolved.

use super::errors::{ErrorKind, FieldError, ValidationErrors};
use super::rule::Rule;
use super::schema::{Schema, SchemaEntry};
use crate::state::{FieldPath, FieldValue, FormValues};
use serde::{Deserialize, Serialize};

/// Message recorded when a remote check could not be carried out
pub const UNAVAILABLE_MESSAGE: &str = "Vérification indisponible, réessayez";

/// What to do when an async rule errors instead of answering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteFailurePolicy {
    /// Let the field through
    Pass,
    /// Treat the error as a failed rule
    Fail,
    /// Record a distinct "unavailable" error and block submission
    #[default]
    Unavailable,
}

/// Which rules to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Every rule, including async ones
    Full,
    /// Synchronous rules only, for re-validation while typing
    Local,
}

/// Result of one validation pass
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Validation {
    pub errors: ValidationErrors,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    policy: RemoteFailurePolicy,
}

impl Validator {
    pub fn new(policy: RemoteFailurePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> RemoteFailurePolicy {
        self.policy
    }

    /// Validate `snapshot` against `schema`
    pub async fn validate(
        &self,
        schema: &Schema,
        snapshot: &FormValues,
        mode: ValidationMode,
    ) -> Validation {
        let mut errors = ValidationErrors::new();

        for entry in schema.entries() {
            match entry {
                SchemaEntry::Field { name, rules } => {
                    let value = snapshot.get(name).cloned().unwrap_or_default();
                    if let Some(error) = self.first_failure(rules, &value, snapshot, mode).await {
                        errors.insert(FieldPath::field(name), error);
                    }
                }
                SchemaEntry::List { name, item } => {
                    for (index, list_entry) in snapshot.list(name).iter().enumerate() {
                        for (field, rules) in item {
                            let value = list_entry.field(field).unwrap_or_default();
                            if let Some(error) =
                                self.first_failure(rules, &value, snapshot, mode).await
                            {
                                errors.insert(FieldPath::item(name, index, field), error);
                            }
                        }
                    }
                }
            }
        }

        tracing::debug!("Validation finished with {} error(s)", errors.len());
        Validation { errors }
    }

    /// Evaluate rules in order, stopping at the first one that fails
    async fn first_failure(
        &self,
        rules: &[Rule],
        value: &FieldValue,
        snapshot: &FormValues,
        mode: ValidationMode,
    ) -> Option<FieldError> {
        for rule in rules {
            if let Some(error) = self.evaluate(rule, value, snapshot, mode).await {
                return Some(error);
            }
        }
        None
    }

    async fn evaluate(
        &self,
        rule: &Rule,
        value: &FieldValue,
        snapshot: &FormValues,
        mode: ValidationMode,
    ) -> Option<FieldError> {
        let failed = || Some(FieldError::new(rule.kind(), rule.message()));

        if let Some(passed) = rule.check_sync(value, snapshot) {
            return if passed { None } else { failed() };
        }

        let Rule::Async { predicate, .. } = rule else {
            return None;
        };
        if mode == ValidationMode::Local {
            return None;
        }

        match predicate.check(value).await {
            Ok(true) => None,
            Ok(false) => failed(),
            Err(e) => {
                tracing::warn!("Remote check failed ({:?} policy): {e}", self.policy);
                match self.policy {
                    RemoteFailurePolicy::Pass => None,
                    RemoteFailurePolicy::Fail => failed(),
                    RemoteFailurePolicy::Unavailable => {
                        Some(FieldError::new(ErrorKind::Unavailable, UNAVAILABLE_MESSAGE))
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::state::{HobbyEntry, HobbyLevel};
    use crate::validation::rule::MockAsyncPredicate;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn predicate(result: fn() -> Result<bool, ApiError>, times: usize) -> Arc<MockAsyncPredicate> {
        let mut mock = MockAsyncPredicate::new();
        mock.expect_check().times(times).returning(move |_| result());
        Arc::new(mock)
    }

    fn remote_schema(pred: Arc<MockAsyncPredicate>) -> Schema {
        Schema::new().field(
            "lastname",
            vec![
                Rule::required("Ce champ est requis"),
                Rule::remote(pred, "Nom refusé"),
            ],
        )
    }

    fn messages(validation: &Validation) -> Vec<(String, String)> {
        validation
            .errors
            .iter()
            .map(|(p, e)| (p.to_string(), e.message.clone()))
            .collect()
    }

    #[tokio::test]
    async fn test_first_failing_rule_wins() {
        let schema = Schema::new().field(
            "lastname",
            vec![
                Rule::required("Ce champ est requis"),
                Rule::min_length(2, "Le nom est trop court"),
            ],
        );

        let empty = FormValues::new().with("lastname", "");
        let result = Validator::default()
            .validate(&schema, &empty, ValidationMode::Full)
            .await;
        assert_eq!(
            messages(&result),
            vec![("lastname".to_string(), "Ce champ est requis".to_string())]
        );
    }

    #[tokio::test]
    async fn test_async_rule_skipped_after_sync_failure() {
        let schema = remote_schema(predicate(|| Ok(true), 0));
        let values = FormValues::new().with("lastname", "");
        let result = Validator::default()
            .validate(&schema, &values, ValidationMode::Full)
            .await;
        assert!(!result.is_valid());
    }

    #[tokio::test]
    async fn test_async_rule_pass_and_fail() {
        let values = FormValues::new().with("lastname", "Dupont");

        let ok = Validator::default()
            .validate(&remote_schema(predicate(|| Ok(true), 1)), &values, ValidationMode::Full)
            .await;
        assert!(ok.is_valid());

        let refused = Validator::default()
            .validate(&remote_schema(predicate(|| Ok(false), 1)), &values, ValidationMode::Full)
            .await;
        assert_eq!(
            messages(&refused),
            vec![("lastname".to_string(), "Nom refusé".to_string())]
        );
    }

    #[tokio::test]
    async fn test_local_mode_never_calls_predicate() {
        let values = FormValues::new().with("lastname", "Dupont");
        let result = Validator::default()
            .validate(&remote_schema(predicate(|| Ok(false), 0)), &values, ValidationMode::Local)
            .await;
        assert!(result.is_valid());
    }

    mod failure_policy {
        use super::*;
        use pretty_assertions::assert_eq;

        fn broken() -> Result<bool, ApiError> {
            Err(ApiError::Status(503))
        }

        async fn run(policy: RemoteFailurePolicy) -> Validation {
            let values = FormValues::new().with("lastname", "Dupont");
            Validator::new(policy)
                .validate(&remote_schema(predicate(broken, 1)), &values, ValidationMode::Full)
                .await
        }

        #[tokio::test]
        async fn test_pass_policy_lets_field_through() {
            assert!(run(RemoteFailurePolicy::Pass).await.is_valid());
        }

        #[tokio::test]
        async fn test_fail_policy_uses_rule_message() {
            let result = run(RemoteFailurePolicy::Fail).await;
            assert_eq!(result.errors.message("lastname"), Some("Nom refusé"));
        }

        #[tokio::test]
        async fn test_unavailable_policy_records_distinct_error() {
            let result = run(RemoteFailurePolicy::Unavailable).await;
            let error = result.errors.get(&FieldPath::field("lastname")).unwrap();
            assert_eq!(error.kind, ErrorKind::Unavailable);
            assert_eq!(error.message, "Vérification indisponible, réessayez");
        }
    }

    #[tokio::test]
    async fn test_list_entries_validated_independently() {
        let schema = Schema::new().list(
            "hobbies",
            vec![
                ("value", vec![Rule::required("Hobby requis")]),
                ("level", vec![Rule::one_of(&["beginner", "advanced"], "Niveau")]),
            ],
        );
        let values = FormValues::new().with(
            "hobbies",
            vec![
                HobbyEntry::new("Escalade", HobbyLevel::Beginner),
                HobbyEntry::new("", HobbyLevel::Advanced),
                HobbyEntry::new("Piano", HobbyLevel::Intermediate),
            ],
        );

        let result = Validator::default()
            .validate(&schema, &values, ValidationMode::Full)
            .await;

        assert_eq!(
            messages(&result),
            vec![
                ("hobbies[1].value".to_string(), "Hobby requis".to_string()),
                ("hobbies[2].level".to_string(), "Niveau".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_field_is_treated_as_empty() {
        let schema = Schema::new().field("lastname", vec![Rule::required("requis")]);
        let result = Validator::default()
            .validate(&schema, &FormValues::new(), ValidationMode::Full)
            .await;
        assert_eq!(result.errors.message("lastname"), Some("requis"));
    }

    #[test]
    fn test_policy_deserializes_lowercase() {
        let policy: RemoteFailurePolicy = serde_json::from_str("\"fail\"").unwrap();
        assert_eq!(policy, RemoteFailurePolicy::Fail);
        assert_eq!(RemoteFailurePolicy::default(), RemoteFailurePolicy::Unavailable);
    }
}
