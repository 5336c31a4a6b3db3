//! Offense estimates with arson counts joined in.
//!
//! Estimates and arson live on separate endpoints; both are fetched
//! together and arson is left-joined onto the estimates by `year`.

use std::collections::BTreeMap;

use crime_explorer_models::{ArsonRecord, EstimateRecord, KeyedResults, NATIONAL_KEY, PlaceRef, PlaceType};

use crate::{ApiError, ExplorerApi, HttpGet, PlannedRequest};

/// Page size for estimates requests.
pub const ESTIMATES_PAGE_SIZE: u32 = 500;

/// Page size for arson requests.
pub const ARSON_PAGE_SIZE: u32 = 50;

/// Picks the `states/{id}`, `regions/{place}` or `national` suffix used by
/// the estimates and arson endpoints. Agencies have neither, so they fall
/// back to national.
fn aggregate_location(place: PlaceRef<'_>) -> String {
    if place.is_national() {
        return "national".to_string();
    }
    match place.place_type {
        PlaceType::State => format!("states/{}", place.place_id),
        PlaceType::Region => format!("regions/{}", place.place),
        PlaceType::Agency | PlaceType::National => "national".to_string(),
    }
}

fn aggregate_key(place: PlaceRef<'_>) -> &str {
    if place.place.is_empty() {
        NATIONAL_KEY
    } else {
        place.place
    }
}

/// Plans the estimates request for a place.
#[must_use]
pub fn plan_estimates(place: PlaceRef<'_>) -> PlannedRequest {
    PlannedRequest::new(
        aggregate_key(place),
        format!("api/estimates/{}", aggregate_location(place)),
    )
    .param("size", ESTIMATES_PAGE_SIZE)
}

/// Plans the arson request for a place.
#[must_use]
pub fn plan_arson(place: PlaceRef<'_>) -> PlannedRequest {
    PlannedRequest::new(
        aggregate_key(place),
        format!("api/arson/{}", aggregate_location(place)),
    )
    .param("size", ARSON_PAGE_SIZE)
}

/// Attaches each arson row's `actual` count to the estimates row of the
/// same year.
///
/// Every estimates row is kept exactly once and in order. Years without
/// arson data get `None`; when arson repeats a year the first row wins.
#[must_use]
pub fn join_arson(estimates: Vec<EstimateRecord>, arson: &[ArsonRecord]) -> Vec<EstimateRecord> {
    let mut by_year = BTreeMap::new();
    for row in arson {
        by_year.entry(row.year).or_insert(row.actual);
    }

    estimates
        .into_iter()
        .map(|mut row| {
            row.arson = by_year.get(&row.year).copied().flatten();
            row
        })
        .collect()
}

impl<T: HttpGet> ExplorerApi<T> {
    /// Fetches a planned estimates/arson pair and joins them. Either
    /// request failing fails the whole result.
    ///
    /// # Errors
    ///
    /// Returns the first [`ApiError`] of the two requests.
    pub async fn run_aggregates(
        &self,
        estimates: &PlannedRequest,
        arson: &PlannedRequest,
    ) -> Result<KeyedResults<EstimateRecord>, ApiError> {
        let (estimate_rows, arson_rows) = futures::try_join!(
            self.fetch_results::<EstimateRecord>(estimates),
            self.fetch_results::<ArsonRecord>(arson),
        )?;

        Ok(KeyedResults {
            key: estimates.key.clone(),
            results: join_arson(estimate_rows, &arson_rows),
        })
    }

    /// Fetches a place's estimates with arson joined in.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if either request fails.
    pub async fn fetch_aggregates(
        &self,
        place: PlaceRef<'_>,
    ) -> Result<KeyedResults<EstimateRecord>, ApiError> {
        self.run_aggregates(&plan_estimates(place), &plan_arson(place))
            .await
    }
}
