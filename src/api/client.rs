//! reqwest client for the demo endpoints
//!
//! Two calls: a GET to a random yes/no endpoint used as a pass/fail gate,
//! and a POST of the form values to a mock user-creation endpoint. A call
//! succeeds only on a 2xx status with a JSON body that decodes.

use super::traits::ApiClientTrait;
use crate::config::TuiConfig;
use crate::state::FormValues;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Header carrying the optional key for the user-creation endpoint
const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Server responded with status {0}")]
    Status(u16),
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Answer of the yes/no endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Answer {
    Yes,
    No,
    Maybe,
    /// Any other word the endpoint may send; never a pass
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct YesNoAnswer {
    pub answer: Answer,
}

impl YesNoAnswer {
    pub fn is_yes(&self) -> bool {
        self.answer == Answer::Yes
    }
}

/// Body returned by the user-creation endpoint
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedUser {
    /// Some servers send a number, others a string
    pub id: Option<serde_json::Value>,
    pub created_at: Option<DateTime<Utc>>,
}

impl CreatedUser {
    pub fn display_id(&self) -> String {
        match &self.id {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "?".to_string(),
        }
    }
}

/// Client for the yes/no and user-creation endpoints
pub struct ApiClient {
    http: reqwest::Client,
    yes_no_url: String,
    users_url: String,
    api_key: Option<String>,
}

impl ApiClient {
    /// Create a new client from the user configuration
    pub fn new(config: &TuiConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs() {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            http: builder.build()?,
            yes_no_url: config.yes_no_url().to_string(),
            users_url: config.users_url().to_string(),
            api_key: config.users_api_key.clone(),
        })
    }
}

#[async_trait]
impl ApiClientTrait for ApiClient {
    async fn ask_yes_no(&self) -> Result<YesNoAnswer, ApiError> {
        let response = self.http.get(&self.yes_no_url).send().await?;
        let answer: YesNoAnswer = read_json(response).await?;
        tracing::debug!("Yes/no endpoint answered {:?}", answer.answer);
        Ok(answer)
    }

    async fn create_user(&self, values: &FormValues) -> Result<CreatedUser, ApiError> {
        let mut request = self.http.post(&self.users_url).json(values);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }
        let response = request.send().await?;
        read_json(response).await
    }
}

/// Check the status, then decode the body as JSON
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status(status.as_u16()));
    }
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{HobbyEntry, HobbyLevel};
    use mockito::{Matcher, Server};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn client_for(server: &Server, api_key: Option<&str>) -> ApiClient {
        let config = TuiConfig {
            yes_no_url: Some(format!("{}/api", server.url())),
            users_url: Some(format!("{}/api/users", server.url())),
            users_api_key: api_key.map(str::to_string),
            request_timeout_secs: Some(5),
            ..Default::default()
        };
        ApiClient::new(&config).unwrap()
    }

    mod yes_no {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_yes_answer() {
            let mut server = Server::new_async().await;
            let mock = server
                .mock("GET", "/api")
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(r#"{"answer":"yes","forced":false,"image":"https://yesno.wtf/x.gif"}"#)
                .create_async()
                .await;

            let answer = client_for(&server, None).ask_yes_no().await.unwrap();

            assert!(answer.is_yes());
            mock.assert_async().await;
        }

        #[tokio::test]
        async fn test_no_answer() {
            let mut server = Server::new_async().await;
            server
                .mock("GET", "/api")
                .with_status(200)
                .with_body(r#"{"answer":"no"}"#)
                .create_async()
                .await;

            let answer = client_for(&server, None).ask_yes_no().await.unwrap();
            assert_eq!(answer.answer, Answer::No);
            assert!(!answer.is_yes());
        }

        #[tokio::test]
        async fn test_unknown_answer_is_not_yes() {
            let mut server = Server::new_async().await;
            server
                .mock("GET", "/api")
                .with_status(200)
                .with_body(r#"{"answer":"perhaps"}"#)
                .create_async()
                .await;

            let answer = client_for(&server, None).ask_yes_no().await.unwrap();
            assert_eq!(answer.answer, Answer::Other);
            assert!(!answer.is_yes());
        }

        #[tokio::test]
        async fn test_server_error_is_status_error() {
            let mut server = Server::new_async().await;
            server
                .mock("GET", "/api")
                .with_status(502)
                .create_async()
                .await;

            let result = client_for(&server, None).ask_yes_no().await;
            assert!(matches!(result, Err(ApiError::Status(502))));
        }

        #[tokio::test]
        async fn test_garbage_body_is_decode_error() {
            let mut server = Server::new_async().await;
            server
                .mock("GET", "/api")
                .with_status(200)
                .with_body("<html>oops</html>")
                .create_async()
                .await;

            let result = client_for(&server, None).ask_yes_no().await;
            assert!(matches!(result, Err(ApiError::Decode(_))));
        }
    }

    mod create_user {
        use super::*;
        use pretty_assertions::assert_eq;

        fn values() -> FormValues {
            FormValues::new()
                .with("lastname", "Dupont")
                .with("rgpd", true)
                .with("hobbies", vec![HobbyEntry::new("Judo", HobbyLevel::Advanced)])
        }

        #[tokio::test]
        async fn test_posts_values_as_json() {
            let mut server = Server::new_async().await;
            let mock = server
                .mock("POST", "/api/users")
                .match_header("content-type", "application/json")
                .match_body(Matcher::Json(json!({
                    "lastname": "Dupont",
                    "rgpd": true,
                    "hobbies": [{"value": "Judo", "level": "advanced"}]
                })))
                .with_status(201)
                .with_body(r#"{"id":"742","createdAt":"2024-05-01T10:00:00.000Z"}"#)
                .create_async()
                .await;

            let user = client_for(&server, None).create_user(&values()).await.unwrap();

            assert_eq!(user.display_id(), "742");
            assert!(user.created_at.is_some());
            mock.assert_async().await;
        }

        #[tokio::test]
        async fn test_sends_api_key_when_configured() {
            let mut server = Server::new_async().await;
            let mock = server
                .mock("POST", "/api/users")
                .match_header("x-api-key", "demo-key")
                .with_status(201)
                .with_body(r#"{"id":1}"#)
                .create_async()
                .await;

            let user = client_for(&server, Some("demo-key"))
                .create_user(&values())
                .await
                .unwrap();

            assert_eq!(user.display_id(), "1");
            mock.assert_async().await;
        }

        #[tokio::test]
        async fn test_non_json_success_is_failure() {
            let mut server = Server::new_async().await;
            server
                .mock("POST", "/api/users")
                .with_status(200)
                .with_body("created")
                .create_async()
                .await;

            let result = client_for(&server, None).create_user(&values()).await;
            assert!(matches!(result, Err(ApiError::Decode(_))));
        }

        #[tokio::test]
        async fn test_client_error_status() {
            let mut server = Server::new_async().await;
            server
                .mock("POST", "/api/users")
                .with_status(401)
                .with_body(r#"{"error":"missing api key"}"#)
                .create_async()
                .await;

            let result = client_for(&server, None).create_user(&values()).await;
            assert!(matches!(result, Err(ApiError::Status(401))));
        }
    }

    #[test]
    fn test_display_id_without_id() {
        assert_eq!(CreatedUser::default().display_id(), "?");
    }
}
