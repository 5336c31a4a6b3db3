//! Agency metadata and per-agency offense aggregates.

use crime_explorer_lookup::offenses::map_to_api_offense;
use crime_explorer_models::{AgencyRecord, KeyedResults};

use crate::{ApiError, ExplorerApi, HttpGet, PlannedRequest};

/// Page size for agency offense requests.
pub const OFFENSES_PAGE_SIZE: u32 = 200;

/// Plans the agency metadata request for an ORI.
#[must_use]
pub fn plan_agency(ori: &str) -> PlannedRequest {
    PlannedRequest::new(ori, format!("api/agencies/{ori}"))
}

/// Plans the agency offense aggregates request, keyed by the ORI.
#[must_use]
pub fn plan_agency_offenses(ori: &str, crime: &str) -> PlannedRequest {
    PlannedRequest::new(ori, format!("api/agencies/count/{ori}/offenses"))
        .param("explorer_offense", map_to_api_offense(crime))
        .param("size", OFFENSES_PAGE_SIZE)
}

impl<T: HttpGet> ExplorerApi<T> {
    /// Fetches the metadata of one agency, or `None` if the API knows no
    /// agency with that ORI.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request or decoding fails.
    pub async fn fetch_agency(&self, ori: &str) -> Result<Option<AgencyRecord>, ApiError> {
        let rows: Vec<AgencyRecord> = self.fetch_results(&plan_agency(ori)).await?;
        Ok(rows.into_iter().next())
    }

    /// Fetches an agency's offense aggregates for a crime.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request or decoding fails.
    pub async fn fetch_agency_aggregates(
        &self,
        ori: &str,
        crime: &str,
    ) -> Result<KeyedResults, ApiError> {
        self.fetch_keyed_results(&plan_agency_offenses(ori, crime))
            .await
    }
}
