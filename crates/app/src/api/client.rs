//! Shared request plumbing: base URL, timeout, bearer header and status mapping.

use confeitaria::{gateway::ApiError, users::BearerToken};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url, header::AUTHORIZATION};
use serde::{Deserialize, de::DeserializeOwned};
use tracing::debug;

use crate::config::{ConfigError, api::ApiConfig};

/// HTTP client bound to one backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    /// Build a client for the configured base URL and timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not an absolute http(s) URL or the
    /// HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, ConfigError> {
        let base_url = normalize_base_url(&config.api_url)?;
        let http = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self { base_url, http })
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!(%method, path, "api request");

        self.http.request(method, self.url(path))
    }

    pub(crate) fn authorized(
        &self,
        method: Method,
        path: &str,
        token: &BearerToken,
    ) -> RequestBuilder {
        self.request(method, path)
            .header(AUTHORIZATION, token.authorization_header())
    }
}

/// Send `request` and decode a JSON body.
pub(crate) async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
    send(request)
        .await?
        .json::<T>()
        .await
        .map_err(|error| ApiError::Decode(error.to_string()))
}

/// Send `request`, ignoring any body.
pub(crate) async fn send_empty(request: RequestBuilder) -> Result<(), ApiError> {
    send(request).await.map(drop)
}

async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
    let response = request
        .send()
        .await
        .map_err(|error| ApiError::Connection(error.to_string()))?;

    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();

    debug!(status = status.as_u16(), "api request failed");

    Err(status_error(status, &text))
}

/// Map a non-success status and its body to an [`ApiError`].
pub(crate) fn status_error(status: StatusCode, body: &str) -> ApiError {
    match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
        StatusCode::FORBIDDEN => ApiError::Forbidden,
        StatusCode::NOT_FOUND => ApiError::NotFound,
        _ => ApiError::Status {
            status: status.as_u16(),
            message: backend_message(body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string()
            }),
        },
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

fn backend_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|error| error.message)
        .filter(|message| !message.trim().is_empty())
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();

    let invalid = |reason: String| ConfigError::InvalidApiUrl {
        url: raw.to_string(),
        reason,
    };

    let parsed = Url::parse(trimmed).map_err(|error| invalid(error.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!(
            "unsupported scheme {:?}, expected http or https",
            parsed.scheme()
        )));
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}
