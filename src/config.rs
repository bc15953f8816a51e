//! Configuration handling for the TUI

use crate::validation::RemoteFailurePolicy;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default random yes/no endpoint
pub const DEFAULT_YES_NO_URL: &str = "https://yesno.wtf/api";

/// Default mock user-creation endpoint
pub const DEFAULT_USERS_URL: &str = "https://reqres.in/api/users";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Yes/no endpoint used to gate the last name
    pub yes_no_url: Option<String>,
    /// Endpoint receiving the submitted form
    pub users_url: Option<String>,
    /// Key sent with submissions, for endpoints that require one
    pub users_api_key: Option<String>,
    /// Request timeout; 0 disables it
    pub request_timeout_secs: Option<u64>,
    /// What to do when the remote check errors
    pub remote_failure_policy: Option<RemoteFailurePolicy>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "inscription", "inscription-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from `path`, falling back to defaults when it is missing
    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: TuiConfig = serde_json::from_str(&content)?;
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn yes_no_url(&self) -> &str {
        self.yes_no_url.as_deref().unwrap_or(DEFAULT_YES_NO_URL)
    }

    pub fn users_url(&self) -> &str {
        self.users_url.as_deref().unwrap_or(DEFAULT_USERS_URL)
    }

    /// Effective timeout, `None` when disabled
    pub fn request_timeout_secs(&self) -> Option<u64> {
        match self.request_timeout_secs {
            Some(0) => None,
            Some(secs) => Some(secs),
            None => Some(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn remote_failure_policy(&self) -> RemoteFailurePolicy {
        self.remote_failure_policy.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TuiConfig::default();
        assert!(config.yes_no_url.is_none());
        assert!(config.users_url.is_none());
        assert!(config.users_api_key.is_none());
        assert!(config.request_timeout_secs.is_none());
        assert!(config.remote_failure_policy.is_none());
    }

    #[test]
    fn test_effective_defaults() {
        let config = TuiConfig::default();
        assert_eq!(config.yes_no_url(), DEFAULT_YES_NO_URL);
        assert_eq!(config.users_url(), DEFAULT_USERS_URL);
        assert_eq!(config.request_timeout_secs(), Some(DEFAULT_TIMEOUT_SECS));
        assert_eq!(
            config.remote_failure_policy(),
            RemoteFailurePolicy::Unavailable
        );
    }

    #[test]
    fn test_zero_timeout_disables_it() {
        let config = TuiConfig {
            request_timeout_secs: Some(0),
            ..Default::default()
        };
        assert_eq!(config.request_timeout_secs(), None);
    }

    #[test]
    fn test_serialization() {
        let config = TuiConfig {
            yes_no_url: Some("http://localhost:8080/yesno".to_string()),
            users_url: Some("http://localhost:8080/users".to_string()),
            users_api_key: Some("key".to_string()),
            request_timeout_secs: Some(3),
            remote_failure_policy: Some(RemoteFailurePolicy::Pass),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: TuiConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.yes_no_url(), "http://localhost:8080/yesno");
        assert_eq!(parsed.users_url(), "http://localhost:8080/users");
        assert_eq!(parsed.users_api_key, Some("key".to_string()));
        assert_eq!(parsed.request_timeout_secs(), Some(3));
        assert_eq!(parsed.remote_failure_policy(), RemoteFailurePolicy::Pass);
    }

    #[test]
    fn test_policy_from_json() {
        let json = r#"{"remote_failure_policy": "fail"}"#;
        let parsed: TuiConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.remote_failure_policy(), RemoteFailurePolicy::Fail);
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: TuiConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.users_url.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"users_url": "http://x", "unknown_field": "value"}"#;
        let parsed: TuiConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.users_url(), "http://x");
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("inscription-tui-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = TuiConfig::load_from(&temp_path("missing.json")).unwrap();
        assert!(config.yes_no_url.is_none());
        assert_eq!(config.users_url(), DEFAULT_USERS_URL);
    }

    #[test]
    fn test_load_reads_file() {
        let path = temp_path("config.json");
        fs::write(&path, r#"{"users_url": "http://localhost:9/users"}"#).unwrap();
        let loaded = TuiConfig::load_from(&path);
        fs::remove_file(&path).unwrap();

        assert_eq!(loaded.unwrap().users_url(), "http://localhost:9/users");
    }

    #[test]
    fn test_load_rejects_invalid_json() {
        let path = temp_path("broken.json");
        fs::write(&path, "{not json").unwrap();
        let loaded = TuiConfig::load_from(&path);
        fs::remove_file(&path).unwrap();

        assert!(loaded.is_err());
    }
}
