//! Law Enforcement Officers Killed and Assaulted (LEOKA) requests.

use crime_explorer_models::{Filters, KeyedData, PlaceType, upper_first};

use crate::location::location_segment;
use crate::{ApiError, ExplorerApi, HttpGet, PlannedRequest};

/// Page size for LEOKA requests.
pub const PAGE_SIZE: u32 = 1000;

/// Dimensions fetched for every place.
pub const DIMENSIONS: &[&str] = &["group", "assign-dist", "weapon"];

/// Extra dimensions that are only published above the agency level.
pub const NON_AGENCY_DIMENSIONS: &[&str] = &["weapon-group", "weapon-activity"];

/// Plans one LEOKA dimension request, keyed `{page_type}{Dim}`.
#[must_use]
pub fn plan_dimension(dim: &str, filters: &Filters) -> PlannedRequest {
    let loc = location_segment(filters.place_ref());
    PlannedRequest::new(
        format!("{}{}", filters.page_type, upper_first(dim)),
        format!("leoka/{}/{dim}/count/{loc}", filters.page_type),
    )
    .param("size", PAGE_SIZE)
    .param("aggregate_many", false)
}

/// Plans every LEOKA request for a page.
#[must_use]
pub fn plan_leoka(filters: &Filters) -> Vec<PlannedRequest> {
    let extra: &[&str] = if filters.place_type == PlaceType::Agency {
        &[]
    } else {
        NON_AGENCY_DIMENSIONS
    };

    DIMENSIONS
        .iter()
        .chain(extra)
        .map(|dim| plan_dimension(dim, filters))
        .collect()
}

impl<T: HttpGet> ExplorerApi<T> {
    /// Fetches every LEOKA dimension concurrently; one result per
    /// dimension.
    pub async fn leoka(&self, filters: &Filters) -> Vec<Result<KeyedData, ApiError>> {
        self.fetch_all_keyed_data(&plan_leoka(filters)).await
    }
}
