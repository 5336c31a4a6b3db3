//! UCR participation requests.

use crime_explorer_models::{Filters, PlaceRef, PlaceResults, PlaceType};
use futures::future::join_all;

use crate::{ApiError, ExplorerApi, HttpGet, PlannedRequest, log_failures};

/// Endpoint for a place's participation rows.
///
/// The national sentinel always maps to the national endpoint; states and
/// agencies are addressed by `place_id`, regions by slug.
#[must_use]
pub fn participation_path(place: PlaceRef<'_>) -> String {
    if place.is_national() {
        return "api/participation/national".to_string();
    }
    match place.place_type {
        PlaceType::Region => format!("api/participation/regions/{}", place.place),
        PlaceType::State => format!("api/participation/states/{}", place.place_id),
        PlaceType::Agency => format!("api/participation/agencies/{}", place.place_id),
        PlaceType::National => "api/participation/national".to_string(),
    }
}

/// Plans the participation request for one place, keyed by the place.
#[must_use]
pub fn plan_participation(place: PlaceRef<'_>) -> PlannedRequest {
    PlannedRequest::new(place.place, participation_path(place))
}

/// Plans the place's participation plus the national participation,
/// unless the place already is national.
#[must_use]
pub fn plan_participation_requests(filters: &Filters) -> Vec<PlannedRequest> {
    let mut requests = vec![plan_participation(filters.place_ref())];
    if !filters.is_national() {
        requests.push(plan_participation(PlaceRef::national()));
    }
    requests
}

impl<T: HttpGet> ExplorerApi<T> {
    async fn run_participation(&self, request: &PlannedRequest) -> Result<PlaceResults, ApiError> {
        let results = self.fetch_results(request).await?;
        Ok(PlaceResults {
            place: request.key.clone(),
            results,
        })
    }

    /// Fetches one place's participation rows.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request or decoding fails.
    pub async fn fetch_participation(&self, place: PlaceRef<'_>) -> Result<PlaceResults, ApiError> {
        self.run_participation(&plan_participation(place)).await
    }

    /// Fetches participation for the place and, unless it is national,
    /// for the nation; one result per request.
    pub async fn participation(&self, filters: &Filters) -> Vec<Result<PlaceResults, ApiError>> {
        let requests = plan_participation_requests(filters);
        let results = join_all(requests.iter().map(|r| self.run_participation(r))).await;
        log_failures(requests.iter().map(|r| r.key.as_str()), &results);
        results
    }
}
