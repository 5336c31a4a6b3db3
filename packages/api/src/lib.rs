#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Request orchestration for the crime data explorer.
//!
//! Every page of the explorer needs a fixed set of API calls that depends
//! only on the current [`Filters`]. Each data domain is split in two
//! layers:
//!
//! 1. **Planning**: pure `plan_*` functions turn filters into
//!    [`PlannedRequest`]s (path relative to the API proxy, query
//!    parameters, result key). All URL rules live here.
//! 2. **Fetching**: methods on [`ExplorerApi`] issue the planned requests
//!    concurrently through an [`HttpGet`] transport and re-key the
//!    `{results: [...]}` envelopes into the shapes the views consume.
//!
//! Independent batches (NIBRS slices, LEOKA, summary, participation)
//! return one `Result` per request so callers can render partial data.
//! Joined batches (estimates + arson) fail as a whole. Nothing is retried
//! or cached.

pub mod agency;
pub mod config;
pub mod estimates;
pub mod http;
pub mod leoka;
pub mod location;
pub mod lookups;
pub mod nibrs;
pub mod participation;
pub mod police;
pub mod summary;

#[cfg(test)]
mod testing;

use crime_explorer_models::{Envelope, KeyedData, KeyedResults, Record};
use futures::future::join_all;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use config::ApiConfig;
pub use crime_explorer_models::Filters;
pub use http::{HttpGet, ReqwestTransport};

/// Errors from explorer API requests.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be sent or the body could not be read.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Human-readable failure message.
        message: String,
        /// Full URL that was requested.
        url: String,
    },

    /// The response body was not the expected JSON shape.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A place could not be resolved to an API location.
    #[error("Unknown place: {place}")]
    UnknownPlace {
        /// The place that could not be resolved.
        place: String,
    },

    /// Invalid client configuration.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of what went wrong.
        message: String,
    },
}

/// Display form of a failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedError {
    /// HTTP status code.
    pub code: u16,
    /// Failure message.
    pub message: String,
    /// URL that failed.
    pub url: String,
}

/// Extracts `{code, message, url}` from an error that carries an HTTP
/// response.
///
/// Returns `None` for failures that never got a response (connection
/// errors, bad JSON, configuration).
#[must_use]
pub fn format_error(error: &ApiError) -> Option<FormattedError> {
    match error {
        ApiError::Status {
            status,
            message,
            url,
        } => Some(FormattedError {
            code: *status,
            message: message.clone(),
            url: url.clone(),
        }),
        ApiError::Http(e) => {
            let status = e.status()?;
            Some(FormattedError {
                code: status.as_u16(),
                message: e.to_string(),
                url: e.url().map(ToString::to_string).unwrap_or_default(),
            })
        }
        ApiError::Json(_) | ApiError::UnknownPlace { .. } | ApiError::Config { .. } => None,
    }
}

/// One fully-resolved API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedRequest {
    /// Key the normalized result is stored under.
    pub key: String,
    /// Path relative to the API proxy (no leading slash).
    pub path: String,
    /// Query parameters, in insertion order.
    pub params: Vec<(&'static str, String)>,
}

impl PlannedRequest {
    /// Creates a request without query parameters.
    #[must_use]
    pub fn new(key: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            path: path.into(),
            params: Vec::new(),
        }
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn param(mut self, name: &'static str, value: impl ToString) -> Self {
        self.params.push((name, value.to_string()));
        self
    }

    /// Looks up a query parameter by name.
    #[must_use]
    pub fn param_value(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Client for the explorer API over any [`HttpGet`] transport.
#[derive(Debug, Clone)]
pub struct ExplorerApi<T> {
    transport: T,
}

impl ExplorerApi<ReqwestTransport> {
    /// Creates a client backed by `reqwest`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the HTTP client cannot be built.
    pub fn from_config(config: ApiConfig) -> Result<Self, ApiError> {
        Ok(Self::new(ReqwestTransport::new(config)?))
    }
}

impl<T: HttpGet> ExplorerApi<T> {
    /// Wraps a transport.
    #[must_use]
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    /// The underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Issues one planned request and decodes its `results` array.
    async fn fetch_results<R: DeserializeOwned>(
        &self,
        request: &PlannedRequest,
    ) -> Result<Vec<R>, ApiError> {
        log::debug!(
            "GET {} {:?} (key={})",
            request.path,
            request.params,
            request.key
        );
        let body = self.transport.get(&request.path, &request.params).await?;
        let envelope: Envelope<R> = serde_json::from_value(body)?;
        Ok(envelope.results)
    }

    async fn fetch_keyed_data(&self, request: &PlannedRequest) -> Result<KeyedData, ApiError> {
        let data: Vec<Record> = self.fetch_results(request).await?;
        Ok(KeyedData {
            key: request.key.clone(),
            data,
        })
    }

    async fn fetch_keyed_results(&self, request: &PlannedRequest) -> Result<KeyedResults, ApiError> {
        let results = self.fetch_results(request).await?;
        Ok(KeyedResults {
            key: request.key.clone(),
            results,
        })
    }

    /// Issues every request concurrently, keeping one result per request.
    async fn fetch_all_keyed_data(
        &self,
        requests: &[PlannedRequest],
    ) -> Vec<Result<KeyedData, ApiError>> {
        let results = join_all(requests.iter().map(|r| self.fetch_keyed_data(r))).await;
        log_failures(requests.iter().map(|r| r.key.as_str()), &results);
        results
    }
}

/// Logs each failed slot of an independent batch.
fn log_failures<'a, T>(
    keys: impl Iterator<Item = &'a str>,
    results: &[Result<T, ApiError>],
) {
    for (key, result) in keys.zip(results) {
        if let Err(e) = result {
            log::warn!("Request for '{key}' failed: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_status_errors() {
        let error = ApiError::Status {
            status: 404,
            message: "Request failed with status code 404".to_string(),
            url: "http://localhost:6005/api-proxy/api/estimates/national".to_string(),
        };
        assert_eq!(
            format_error(&error),
            Some(FormattedError {
                code: 404,
                message: "Request failed with status code 404".to_string(),
                url: "http://localhost:6005/api-proxy/api/estimates/national".to_string(),
            })
        );
    }

    #[test]
    fn errors_without_response_do_not_format() {
        let error = ApiError::UnknownPlace {
            place: "XX0000000".to_string(),
        };
        assert_eq!(format_error(&error), None);
    }

    #[test]
    fn planned_request_params_keep_order() {
        let request = PlannedRequest::new("k", "api/x")
            .param("size", 50)
            .param("aggregate_many", false);
        assert_eq!(request.param_value("size"), Some("50"));
        assert_eq!(request.param_value("aggregate_many"), Some("false"));
        assert_eq!(request.param_value("missing"), None);
        assert_eq!(request.params[0].0, "size");
    }
}
