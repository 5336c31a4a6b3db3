//! NIBRS breakdown and count requests.
//!
//! Two endpoint families, each driven by a static slice catalog:
//!
//! - **Breakdowns** (`{facet}s/count/{loc}/{field}/offenses`): demographic
//!   and location breakdowns filtered to the current crime.
//! - **Counts** (`api/nibrs/{facet}/{loc}/{field}`): raw counts, including
//!   totals-only slices that omit the field segment.

use crime_explorer_lookup::offenses::map_to_api_offense;
use crime_explorer_models::{Dimension, Facet, Filters, KeyedData, PlaceRef, Slice};

use crate::location::{dimension_field, location_segment};
use crate::{ApiError, ExplorerApi, HttpGet, PlannedRequest};

/// Page size for breakdown requests.
pub const BREAKDOWN_PAGE_SIZE: u32 = 50;

/// Page size for count requests.
pub const COUNTS_PAGE_SIZE: u32 = 1000;

/// Breakdown slices fetched for every NIBRS page.
pub const BREAKDOWN_SLICES: [Slice; 11] = [
    Slice::named(Facet::Offender, "ageNum"),
    Slice::named(Facet::Offender, "ethnicity"),
    Slice::named(Facet::Offender, "raceCode"),
    Slice::named(Facet::Offender, "sexCode"),
    Slice::named(Facet::Offense, "locationName"),
    Slice::named(Facet::Offense, "offenseName"),
    Slice::named(Facet::Victim, "ageNum"),
    Slice::named(Facet::Victim, "ethnicity"),
    Slice::named(Facet::Victim, "raceCode"),
    Slice::named(Facet::Victim, "sexCode"),
    Slice::named(Facet::Victim, "relationship"),
];

/// Count slices fetched for every NIBRS counts page.
pub const COUNT_SLICES: [Slice; 13] = [
    Slice::totals(Facet::Offender),
    Slice::named(Facet::Offender, "age"),
    Slice::named(Facet::Offender, "sex"),
    Slice::named(Facet::Offender, "race"),
    Slice::named(Facet::Offender, "ethnicity"),
    Slice::totals(Facet::Victim),
    Slice::named(Facet::Victim, "age"),
    Slice::named(Facet::Victim, "ethnicity"),
    Slice::named(Facet::Victim, "race"),
    Slice::named(Facet::Victim, "sex"),
    Slice::named(Facet::Victim, "location"),
    Slice::named(Facet::Victim, "relationships"),
    Slice::totals(Facet::Offense),
];

/// Plans one breakdown request.
///
/// The `offenseName` dimension is the only one served without the
/// trailing `/offenses` segment.
#[must_use]
pub fn plan_breakdown(slice: Slice, place: PlaceRef<'_>, crime: &str) -> PlannedRequest {
    let loc = location_segment(place);
    let field_path = match slice.dim {
        Dimension::Named("offenseName") => dimension_field("offenseName").to_string(),
        Dimension::Named(dim) => format!("{}/offenses", dimension_field(dim)),
        Dimension::NoDimension => "offenses".to_string(),
    };

    PlannedRequest::new(
        slice.key(),
        format!("{}s/count/{loc}/{field_path}", slice.facet),
    )
    .param("size", BREAKDOWN_PAGE_SIZE)
    .param("aggregate_many", false)
    .param("explorer_offense", map_to_api_offense(crime))
}

/// Plans every breakdown request for a page.
#[must_use]
pub fn plan_breakdowns(filters: &Filters) -> Vec<PlannedRequest> {
    BREAKDOWN_SLICES
        .iter()
        .map(|slice| plan_breakdown(*slice, filters.place_ref(), &filters.page_type))
        .collect()
}

/// Plans one count request.
#[must_use]
pub fn plan_count(slice: Slice, place: PlaceRef<'_>) -> PlannedRequest {
    let loc = location_segment(place);
    let path = match slice.dim {
        Dimension::NoDimension => format!("api/nibrs/{}/{loc}", slice.facet),
        Dimension::Named(dim) => {
            format!("api/nibrs/{}/{loc}/{}", slice.facet, dimension_field(dim))
        }
    };

    PlannedRequest::new(slice.key(), path)
        .param("size", COUNTS_PAGE_SIZE)
        .param("aggregate_many", false)
}

/// Plans every count request for a page.
#[must_use]
pub fn plan_counts(filters: &Filters) -> Vec<PlannedRequest> {
    COUNT_SLICES
        .iter()
        .map(|slice| plan_count(*slice, filters.place_ref()))
        .collect()
}

impl<T: HttpGet> ExplorerApi<T> {
    /// Fetches a single breakdown slice.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request or decoding fails.
    pub async fn fetch_nibrs(&self, slice: Slice, filters: &Filters) -> Result<KeyedData, ApiError> {
        self.fetch_keyed_data(&plan_breakdown(
            slice,
            filters.place_ref(),
            &filters.page_type,
        ))
        .await
    }

    /// Fetches every breakdown slice concurrently; one result per slice in
    /// catalog order.
    pub async fn nibrs(&self, filters: &Filters) -> Vec<Result<KeyedData, ApiError>> {
        self.fetch_all_keyed_data(&plan_breakdowns(filters)).await
    }

    /// Fetches a single count slice.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request or decoding fails.
    pub async fn fetch_nibrs_counts(
        &self,
        slice: Slice,
        filters: &Filters,
    ) -> Result<KeyedData, ApiError> {
        self.fetch_keyed_data(&plan_count(slice, filters.place_ref()))
            .await
    }

    /// Fetches every count slice concurrently; one result per slice in
    /// catalog order.
    pub async fn nibrs_counts(&self, filters: &Filters) -> Vec<Result<KeyedData, ApiError>> {
        self.fetch_all_keyed_data(&plan_counts(filters)).await
    }
}

#[cfg(test)]
mod tests {
    use crime_explorer_models::{NATIONAL_KEY, PlaceType};
    use serde_json::json;

    use super::*;
    use crate::testing::MockTransport;

    fn filters(place: &str, place_type: PlaceType) -> Filters {
        Filters {
            place: place.to_string(),
            place_type,
            place_id: "OH".to_string(),
            page_type: "violent-crime".to_string(),
            page: None,
            since: 2010,
            until: 2016,
        }
    }

    #[test]
    fn breakdown_paths() {
        let f = filters("ohio", PlaceType::State);
        let paths: Vec<String> = plan_breakdowns(&f).into_iter().map(|r| r.path).collect();
        assert_eq!(
            paths,
            vec![
                "offenders/count/states/OH/age_num/offenses",
                "offenders/count/states/OH/ethnicity/offenses",
                "offenders/count/states/OH/race_code/offenses",
                "offenders/count/states/OH/sex_code/offenses",
                "offenses/count/states/OH/location_name/offenses",
                "offenses/count/states/OH/offense_name",
                "victims/count/states/OH/age_num/offenses",
                "victims/count/states/OH/ethnicity/offenses",
                "victims/count/states/OH/race_code/offenses",
                "victims/count/states/OH/sex_code/offenses",
                "victims/count/states/OH/offender_relationship/offenses",
            ]
        );
    }

    #[test]
    fn breakdown_params() {
        let f = filters(NATIONAL_KEY, PlaceType::National);
        for request in plan_breakdowns(&f) {
            assert_eq!(request.param_value("size"), Some("50"));
            assert_eq!(request.param_value("aggregate_many"), Some("false"));
            assert_eq!(request.param_value("explorer_offense"), Some("violent_crime"));
        }
    }

    #[test]
    fn breakdown_keys() {
        let keys: Vec<String> = plan_breakdowns(&filters(NATIONAL_KEY, PlaceType::National))
            .into_iter()
            .map(|r| r.key)
            .collect();
        assert_eq!(keys[0], "offenderAgeNum");
        assert_eq!(keys[5], "offenseOffenseName");
        assert_eq!(keys[8], "victimRaceCode");
        assert_eq!(keys[10], "victimRelationship");
    }

    #[test]
    fn count_paths_omit_missing_dimension() {
        let f = filters("OH0180000", PlaceType::Agency);
        let requests = plan_counts(&f);
        assert_eq!(requests.len(), 13);
        assert_eq!(requests[0].path, "api/nibrs/offender/agencies/OH0180000");
        assert_eq!(requests[0].key, "offender");
        assert_eq!(requests[1].path, "api/nibrs/offender/agencies/OH0180000/age");
        assert_eq!(requests[1].key, "offenderAge");
        assert_eq!(
            requests[11].path,
            "api/nibrs/victim/agencies/OH0180000/relationships"
        );
        assert_eq!(requests[12].path, "api/nibrs/offense/agencies/OH0180000");
        assert_eq!(requests[12].key, "offense");
    }

    #[test]
    fn count_params() {
        for request in plan_counts(&filters("ohio", PlaceType::State)) {
            assert_eq!(request.param_value("size"), Some("1000"));
            assert_eq!(request.param_value("aggregate_many"), Some("false"));
            assert_eq!(request.param_value("explorer_offense"), None);
        }
    }

    #[tokio::test]
    async fn fetches_every_breakdown_with_keys() {
        let api = ExplorerApi::new(MockTransport::new().with_results(
            "victims/count/national/race_code/offenses",
            json!([{ "race_code": "W", "count": 10 }]),
        ));
        let results = api.nibrs(&filters(NATIONAL_KEY, PlaceType::National)).await;

        assert_eq!(results.len(), 11);
        assert_eq!(api.transport().calls().len(), 11);

        let race = results
            .iter()
            .flatten()
            .find(|r| r.key == "victimRaceCode")
            .unwrap();
        assert_eq!(race.data.len(), 1);
        assert_eq!(race.data[0].get("count"), Some(&json!(10)));
    }

    #[tokio::test]
    async fn one_failed_slice_does_not_fail_the_others() {
        let api = ExplorerApi::new(
            MockTransport::new().failing("api/nibrs/victim/states/OH/location", 500),
        );
        let results = api.nibrs_counts(&filters("ohio", PlaceType::State)).await;

        assert_eq!(results.len(), 13);
        assert_eq!(results.iter().filter(|r| r.is_err()).count(), 1);
        assert!(matches!(
            results[10],
            Err(ApiError::Status { status: 500, .. })
        ));
    }
}
