//! In-memory transport for orchestration tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::{ApiError, HttpGet};

type Call = (String, Vec<(&'static str, String)>);

/// Serves canned bodies by path and records every call.
///
/// Paths without a canned body answer `{"results": []}`.
#[derive(Default)]
pub struct MockTransport {
    bodies: BTreeMap<String, Value>,
    failures: BTreeMap<String, u16>,
    calls: Mutex<Vec<Call>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_results(mut self, path: &str, results: Value) -> Self {
        self.bodies
            .insert(path.to_string(), json!({ "results": results }));
        self
    }

    pub fn failing(mut self, path: &str, status: u16) -> Self {
        self.failures.insert(path.to_string(), status);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.calls().into_iter().map(|(path, _)| path).collect()
    }
}

#[async_trait]
impl HttpGet for MockTransport {
    async fn get(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<Value, ApiError> {
        self.calls
            .lock()
            .unwrap()
            .push((path.to_string(), params.to_vec()));

        if let Some(status) = self.failures.get(path) {
            return Err(ApiError::Status {
                status: *status,
                message: format!("Request failed with status code {status}"),
                url: format!("http://test/api-proxy/{path}"),
            });
        }

        Ok(self
            .bodies
            .get(path)
            .cloned()
            .unwrap_or_else(|| json!({ "results": [] })))
    }
}
