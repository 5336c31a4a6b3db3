//! Police employment requests.

use crime_explorer_models::{Filters, KeyedResults, NATIONAL_KEY, PlaceRef, PlaceType};
use futures::future::join_all;

use crate::{ApiError, ExplorerApi, HttpGet, PlannedRequest, log_failures};

/// Page size for police employment requests.
pub const PAGE_SIZE: u32 = 500;

/// Endpoint for a place's police employment series.
#[must_use]
pub fn police_employment_path(place: PlaceRef<'_>) -> String {
    if place.is_national() {
        return "api/police-employment/national".to_string();
    }
    match place.place_type {
        PlaceType::State => format!("api/police-employment/states/{}", place.place_id),
        PlaceType::Agency => format!("api/police-employment/agencies/{}", place.place),
        PlaceType::Region => format!("api/police-employment/regions/{}", place.place),
        PlaceType::National => "api/police-employment/national".to_string(),
    }
}

/// Plans the police employment request for one place, keyed by the place
/// (or the national key when no place is given).
#[must_use]
pub fn plan_police_employment(place: PlaceRef<'_>) -> PlannedRequest {
    let key = if place.place.is_empty() {
        NATIONAL_KEY
    } else {
        place.place
    };
    PlannedRequest::new(key, police_employment_path(place)).param("size", PAGE_SIZE)
}

/// Plans the current place plus the national comparison.
#[must_use]
pub fn plan_police_employment_requests(filters: &Filters) -> Vec<PlannedRequest> {
    vec![
        plan_police_employment(filters.place_ref()),
        plan_police_employment(PlaceRef::national()),
    ]
}

impl<T: HttpGet> ExplorerApi<T> {
    /// Fetches the police employment series for one place. Rows are
    /// passed through unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request or decoding fails.
    pub async fn fetch_police_employment(
        &self,
        place: PlaceRef<'_>,
    ) -> Result<KeyedResults, ApiError> {
        self.fetch_keyed_results(&plan_police_employment(place))
            .await
    }

    /// Fetches the current place and the national series concurrently;
    /// the national result is always second.
    pub async fn police_employment(&self, filters: &Filters) -> Vec<Result<KeyedResults, ApiError>> {
        let requests = plan_police_employment_requests(filters);
        let results = join_all(requests.iter().map(|r| self.fetch_keyed_results(r))).await;
        log_failures(requests.iter().map(|r| r.key.as_str()), &results);
        results
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::testing::MockTransport;

    fn place(place_type: PlaceType) -> PlaceRef<'static> {
        PlaceRef {
            place: "northeast",
            place_type,
            place_id: "NY",
        }
    }

    #[test]
    fn routes_by_place_type() {
        assert_eq!(
            police_employment_path(place(PlaceType::State)),
            "api/police-employment/states/NY"
        );
        assert_eq!(
            police_employment_path(place(PlaceType::Agency)),
            "api/police-employment/agencies/northeast"
        );
        assert_eq!(
            police_employment_path(place(PlaceType::Region)),
            "api/police-employment/regions/northeast"
        );
        assert_eq!(
            police_employment_path(place(PlaceType::National)),
            "api/police-employment/national"
        );
        assert_eq!(
            police_employment_path(PlaceRef::national()),
            "api/police-employment/national"
        );
    }

    #[test]
    fn always_plans_national_second() {
        let filters = Filters {
            place: "new-york".to_string(),
            place_type: PlaceType::State,
            place_id: "NY".to_string(),
            page_type: "violent-crime".to_string(),
            page: Some("police".to_string()),
            since: 2010,
            until: 2016,
        };
        let requests = plan_police_employment_requests(&filters);
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].key, "new-york");
        assert_eq!(requests[1].key, NATIONAL_KEY);
        assert_eq!(requests[1].path, "api/police-employment/national");
        assert_eq!(requests[1].param_value("size"), Some("500"));
    }

    #[test]
    fn empty_place_is_keyed_national() {
        let request = plan_police_employment(PlaceRef {
            place: "",
            place_type: PlaceType::National,
            place_id: "",
        });
        assert_eq!(request.key, NATIONAL_KEY);
    }

    #[tokio::test]
    async fn rows_pass_through_unchanged() {
        let rows = json!([
            { "data_year": 2015, "male_officer_ct": 100, "female_officer_ct": 12 },
            { "data_year": 2016, "male_officer_ct": 101, "female_officer_ct": 14 },
        ]);
        let api = ExplorerApi::new(
            MockTransport::new().with_results("api/police-employment/states/NY", rows.clone()),
        );
        let result = api
            .fetch_police_employment(PlaceRef {
                place: "new-york",
                place_type: PlaceType::State,
                place_id: "NY",
            })
            .await
            .unwrap();

        assert_eq!(result.key, "new-york");
        assert_eq!(serde_json::to_value(&result.results).unwrap(), rows);
    }

    #[tokio::test]
    async fn fetcher_issues_place_then_national() {
        let api = ExplorerApi::new(MockTransport::new().failing("api/police-employment/states/NY", 500));
        let filters = Filters {
            place: "new-york".to_string(),
            place_type: PlaceType::State,
            place_id: "NY".to_string(),
            page_type: "violent-crime".to_string(),
            page: None,
            since: 2010,
            until: 2016,
        };

        let results = api.police_employment(&filters).await;
        assert_eq!(results.len(), 2);
        assert!(results[0].is_err());
        assert_eq!(results[1].as_ref().unwrap().key, NATIONAL_KEY);
        assert_eq!(
            api.transport().paths(),
            vec![
                "api/police-employment/states/NY".to_string(),
                "api/police-employment/national".to_string(),
            ]
        );
    }
}
