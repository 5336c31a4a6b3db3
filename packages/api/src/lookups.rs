//! Region and state lookup requests.

use crime_explorer_models::LookupResults;

use crate::{ApiError, ExplorerApi, HttpGet, PlannedRequest};

/// Page size for the state lookup; covers every state and territory.
pub const STATES_PAGE_SIZE: u32 = 100;

/// Plans the region lookup request.
#[must_use]
pub fn plan_regions() -> PlannedRequest {
    PlannedRequest::new("regions", "api/lookup/region")
}

/// Plans the state lookup request.
#[must_use]
pub fn plan_states() -> PlannedRequest {
    PlannedRequest::new("states", "api/lookup/state").param("size", STATES_PAGE_SIZE)
}

impl<T: HttpGet> ExplorerApi<T> {
    async fn fetch_lookup(&self, request: &PlannedRequest) -> Result<LookupResults, ApiError> {
        Ok(LookupResults {
            results: self.fetch_results(request).await?,
        })
    }

    /// Fetches every region. Returned as a single-element batch.
    pub async fn regions(&self) -> Vec<Result<LookupResults, ApiError>> {
        vec![self.fetch_lookup(&plan_regions()).await]
    }

    /// Fetches every state. Returned as a single-element batch.
    pub async fn states(&self) -> Vec<Result<LookupResults, ApiError>> {
        vec![self.fetch_lookup(&plan_states()).await]
    }
}
