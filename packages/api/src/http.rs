//! HTTP transport.
//!
//! The orchestrator only ever needs `GET path?params -> JSON`, so the
//! transport is a single-method trait. [`ReqwestTransport`] is the
//! production implementation; tests substitute an in-memory one.

use async_trait::async_trait;

use crate::{ApiConfig, ApiError};

/// Issues a GET request against the explorer API.
#[async_trait]
pub trait HttpGet: Send + Sync {
    /// Fetches `path` (relative to the API proxy) with the given query
    /// parameters and returns the decoded JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] for non-success responses and
    /// [`ApiError::Http`] / [`ApiError::Json`] for transport or decoding
    /// failures.
    async fn get(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<serde_json::Value, ApiError>;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    config: ApiConfig,
}

impl ReqwestTransport {
    /// Builds a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the TLS backend cannot be
    /// initialized.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self { client, config })
    }

    /// The configuration this transport was built with.
    #[must_use]
    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }
}

#[async_trait]
impl HttpGet for ReqwestTransport {
    async fn get(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<serde_json::Value, ApiError> {
        let url = self.config.endpoint(path);
        let resp = self.client.get(&url).query(params).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let url = resp.url().to_string();
            log::debug!("GET {url} returned {status}");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: format!("Request failed with status code {}", status.as_u16()),
                url,
            });
        }

        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
