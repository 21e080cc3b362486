use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use thiserror::Error;
use uuid::Uuid;

pub use reqwest::StatusCode;

pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone)]
pub struct AppealsClientConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

impl AppealsClientConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

/// Client for the four appeals endpoints. Attaches the bearer credential when
/// one is given; a request issued without one is still sent and left for the
/// backend to reject.
#[derive(Debug, Clone)]
pub struct AppealsClient {
    base_url: String,
    timeout: Duration,
    http: reqwest::Client,
}

#[derive(Debug, Error)]
pub enum ApiClientError {
    #[error("base url must not be empty")]
    BaseUrlMissing,
    #[error("request failed: {message}")]
    Request { message: String },
    #[error("failed to read response body: {message}")]
    Read { message: String },
    #[error("server rejected the request ({status}): {}", .error.as_deref().unwrap_or("<no error body>"))]
    Api {
        status: StatusCode,
        /// The backend's `error` field, verbatim, when the body carried one.
        error: Option<String>,
    },
    #[error("failed to decode response: {message}")]
    Decode { message: String },
}

impl ApiClientError {
    /// The text a resource view surfaces as its `Failed` state: the backend's
    /// `error` field verbatim when one was returned, otherwise the
    /// client-side description.
    #[must_use]
    pub fn view_message(&self) -> String {
        match self {
            Self::Api {
                error: Some(message),
                ..
            } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Login alert text. A rejection whose body omitted the `error` field
    /// yields no message at all; transport and decode failures still get one.
    #[must_use]
    pub fn login_message(&self) -> Option<String> {
        match self {
            Self::Api { error, .. } => error.clone(),
            other => Some(other.to_string()),
        }
    }
}

/// One row of the appeals list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppealSummary {
    pub id: u64,
    pub title: String,
}

/// Append-only; insertion order is display order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppealMessage {
    pub text: String,
    pub is_admin: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppealDetail {
    pub id: u64,
    pub title: String,
    pub messages: Vec<AppealMessage>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginSuccess {
    pub token: String,
    pub refresh_token: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMessageRequest {
    pub message: String,
    pub is_admin: bool,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

impl AppealsClient {
    pub fn new(config: AppealsClientConfig) -> Result<Self, ApiClientError> {
        let base_url = normalize_base_url(&config.base_url)?;
        Ok(Self {
            base_url,
            timeout: Duration::from_millis(config.timeout_ms.max(250)),
            http: reqwest::Client::new(),
        })
    }

    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    #[must_use]
    pub fn login_path() -> &'static str {
        "/api/admin_login"
    }

    #[must_use]
    pub fn appeals_path() -> &'static str {
        "/api/appeals"
    }

    #[must_use]
    pub fn appeal_path(appeal_id: u64) -> String {
        format!("/api/appeals/{appeal_id}")
    }

    #[must_use]
    pub fn add_message_path(appeal_id: u64) -> String {
        format!("/api/appeals/{appeal_id}/add-message")
    }

    /// Exchanges operator credentials for a token pair. The only call that
    /// goes out without a bearer.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginSuccess, ApiClientError> {
        let response = self
            .http
            .post(self.endpoint(Self::login_path()))
            .header("x-request-id", request_id())
            .timeout(self.timeout)
            .json(request)
            .send()
            .await
            .map_err(request_error)?;
        decode_json_response(response).await
    }

    pub async fn list_appeals(
        &self,
        access_token: Option<&str>,
    ) -> Result<Vec<AppealSummary>, ApiClientError> {
        self.get_json(Self::appeals_path(), access_token).await
    }

    pub async fn fetch_appeal(
        &self,
        access_token: Option<&str>,
        appeal_id: u64,
    ) -> Result<AppealDetail, ApiClientError> {
        self.get_json(&Self::appeal_path(appeal_id), access_token)
            .await
    }

    /// Appends a reply. The backend acknowledges with an empty JSON string,
    /// which is discarded.
    pub async fn add_message(
        &self,
        access_token: Option<&str>,
        appeal_id: u64,
        request: &AddMessageRequest,
    ) -> Result<(), ApiClientError> {
        let builder = self
            .http
            .post(self.endpoint(&Self::add_message_path(appeal_id)))
            .header("x-request-id", request_id())
            .timeout(self.timeout)
            .json(request);
        let response = with_bearer(builder, access_token)
            .send()
            .await
            .map_err(request_error)?;
        decode_json_response::<serde_json::Value>(response)
            .await
            .map(|_| ())
    }

    async fn get_json<T>(
        &self,
        path: &str,
        access_token: Option<&str>,
    ) -> Result<T, ApiClientError>
    where
        T: DeserializeOwned,
    {
        let builder = self
            .http
            .get(self.endpoint(path))
            .header("x-request-id", request_id())
            .timeout(self.timeout);
        let response = with_bearer(builder, access_token)
            .send()
            .await
            .map_err(request_error)?;
        decode_json_response(response).await
    }
}

fn request_id() -> String {
    format!("req_{}", Uuid::new_v4().simple())
}

fn with_bearer(
    builder: reqwest::RequestBuilder,
    access_token: Option<&str>,
) -> reqwest::RequestBuilder {
    match access_token {
        Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    }
}

fn request_error(error: reqwest::Error) -> ApiClientError {
    ApiClientError::Request {
        message: error.to_string(),
    }
}

fn normalize_base_url(base_url: &str) -> Result<String, ApiClientError> {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        return Err(ApiClientError::BaseUrlMissing);
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

fn error_from_body(bytes: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(bytes)
        .ok()
        .and_then(|body| body.error)
}

async fn decode_json_response<T>(response: reqwest::Response) -> Result<T, ApiClientError>
where
    T: DeserializeOwned,
{
    let status = response.status();
    let bytes = response
        .bytes()
        .await
        .map_err(|error| ApiClientError::Read {
            message: error.to_string(),
        })?;

    if !status.is_success() {
        return Err(ApiClientError::Api {
            status,
            error: error_from_body(&bytes),
        });
    }

    serde_json::from_slice::<T>(&bytes).map_err(|error| ApiClientError::Decode {
        message: error.to_string(),
    })
}
