/*
[INPUT]:  HTTP configuration (base URL, timeouts, session token)
[OUTPUT]: Configured reqwest client ready for task API calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::auth::JwtManager;
use crate::http::{Result, TaskflowError};
use crate::types::ApiErrorBody;

/// Default base URL for a locally running task API
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Main HTTP client for the task API
#[derive(Debug, Clone)]
pub struct TaskflowClient {
    http_client: Client,
    base_url: Url,
    config: ClientConfig,
    session: JwtManager,
}

impl TaskflowClient {
    /// Create a new client with default configuration against [`DEFAULT_BASE_URL`]
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration against [`DEFAULT_BASE_URL`]
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::with_config_and_base_url(config, DEFAULT_BASE_URL)
    }

    /// Create a new client with custom configuration and base URL
    pub fn with_config_and_base_url(config: ClientConfig, base_url: &str) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        let mut base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(TaskflowError::Config(format!(
                "base URL cannot carry a path: {base_url}"
            )));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            http_client,
            base_url,
            config,
            session: JwtManager::new(),
        })
    }

    /// Store the bearer token used for authenticated requests
    pub fn set_token(&self, token: impl Into<String>) {
        self.session.set_token(token.into());
    }

    /// Session holding the bearer token and its decoded claims
    pub fn session(&self) -> &JwtManager {
        &self.session
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build full URL from path segments; each segment is percent-encoded
    pub(crate) fn endpoint_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                TaskflowError::Config(format!("base URL cannot carry a path: {}", self.base_url))
            })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    /// Build request builder without authentication
    pub(crate) fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        let url = self.endpoint_url(segments)?;
        Ok(self.http_client.request(method, url))
    }

    /// Build request builder carrying the session bearer token.
    ///
    /// A missing or expired token fails with `NotAuthenticated` before any request is sent.
    pub(crate) fn request_with_auth(
        &self,
        method: Method,
        segments: &[&str],
    ) -> Result<RequestBuilder> {
        if self.session.is_expired() {
            if self.session.get_token().is_some() {
                debug!("session token past its exp claim, dropping it");
                self.session.clear();
            }
            return Err(TaskflowError::NotAuthenticated);
        }
        let token = self
            .session
            .get_token()
            .ok_or(TaskflowError::NotAuthenticated)?;
        let builder = self.request(method, segments)?;
        Ok(builder.header(AUTHORIZATION, format!("Bearer {token}")))
    }

    /// Send a request and decode a JSON body, mapping error statuses onto error kinds
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await.map_err(|err| self.transport_error(err))?;
        let status = response.status();
        let url = response.url().clone();
        let body = response.text().await.map_err(|err| self.transport_error(err))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(ApiErrorBody::into_message)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                });
            warn!(status = status.as_u16(), %url, %message, "task API returned error");
            return Err(TaskflowError::from_status(status, message));
        }

        debug!(status = status.as_u16(), %url, "task API response");
        serde_json::from_str(&body).map_err(|err| {
            TaskflowError::InvalidResponse(format!("failed to decode response from {url}: {err}"))
        })
    }

    fn transport_error(&self, err: reqwest::Error) -> TaskflowError {
        if err.is_timeout() {
            TaskflowError::Timeout {
                duration: self.config.timeout.as_secs(),
            }
        } else {
            TaskflowError::Http(err)
        }
    }
}
