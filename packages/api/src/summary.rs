//! Offense summary requests for the trend pages.
//!
//! A summary compares the current place against the nation. Agencies are
//! additionally compared against the state they report through.

use crime_explorer_lookup::{states, text::slugify};
use crime_explorer_models::{EstimateRecord, Filters, KeyedResults, PlaceRef, PlaceType};
use futures::FutureExt as _;
use futures::future::{BoxFuture, join_all};
use serde::Serialize;

use crate::agency::plan_agency_offenses;
use crate::estimates::{plan_arson, plan_estimates};
use crate::{ApiError, ExplorerApi, HttpGet, PlannedRequest, log_failures};

/// One planned slot of a summary page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryPlan {
    /// The agency's own offense aggregates.
    AgencyOffenses(PlannedRequest),
    /// A place's estimates with arson joined in.
    Aggregates {
        /// Estimates request.
        estimates: PlannedRequest,
        /// Arson request.
        arson: PlannedRequest,
    },
    /// The agency's ORI does not name a known state.
    UnknownState {
        /// The unresolved ORI.
        ori: String,
    },
}

impl SummaryPlan {
    fn aggregates(place: PlaceRef<'_>) -> Self {
        Self::Aggregates {
            estimates: plan_estimates(place),
            arson: plan_arson(place),
        }
    }

    /// Key the slot's result is stored under.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::AgencyOffenses(request) | Self::Aggregates { estimates: request, .. } => {
                &request.key
            }
            Self::UnknownState { ori } => ori,
        }
    }
}

/// One resolved slot of a summary page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SummaryResult {
    /// Agency offense aggregates, keyed by ORI.
    AgencyOffenses(KeyedResults),
    /// Estimates with arson, keyed by place.
    Aggregates(KeyedResults<EstimateRecord>),
}

impl SummaryResult {
    /// Key the result is stored under.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::AgencyOffenses(r) => &r.key,
            Self::Aggregates(r) => &r.key,
        }
    }
}

/// Plans the summary slots for a page.
///
/// Agencies get three slots (agency, parent state, nation); every other
/// place gets two (place, nation). The parent state is derived from the
/// ORI prefix and keyed by its slug.
#[must_use]
pub fn plan_summary(filters: &Filters) -> Vec<SummaryPlan> {
    let national = SummaryPlan::aggregates(PlaceRef::national());

    if filters.place_type != PlaceType::Agency {
        return vec![SummaryPlan::aggregates(filters.place_ref()), national];
    }

    let ori = filters.place.as_str();
    let parent = states::ori_to_state_abbr(ori).and_then(|abbr| {
        states::state_name(abbr).map(|name| {
            let slug = slugify(name);
            SummaryPlan::aggregates(PlaceRef {
                place: &slug,
                place_type: PlaceType::State,
                place_id: abbr,
            })
        })
    });

    vec![
        SummaryPlan::AgencyOffenses(plan_agency_offenses(ori, &filters.page_type)),
        parent.unwrap_or_else(|| SummaryPlan::UnknownState {
            ori: ori.to_string(),
        }),
        national,
    ]
}

impl<T: HttpGet> ExplorerApi<T> {
    async fn run_summary_plan(&self, plan: &SummaryPlan) -> Result<SummaryResult, ApiError> {
        match plan {
            SummaryPlan::AgencyOffenses(request) => self
                .fetch_keyed_results(request)
                .await
                .map(SummaryResult::AgencyOffenses),
            SummaryPlan::Aggregates { estimates, arson } => self
                .run_aggregates(estimates, arson)
                .await
                .map(SummaryResult::Aggregates),
            SummaryPlan::UnknownState { ori } => Err(ApiError::UnknownPlace { place: ori.clone() }),
        }
    }

    /// Fetches every summary slot concurrently; one result per slot in
    /// plan order, national last.
    pub async fn summary(&self, filters: &Filters) -> Vec<Result<SummaryResult, ApiError>> {
        let plans = plan_summary(filters);
        let futures: Vec<BoxFuture<'_, Result<SummaryResult, ApiError>>> = plans
            .iter()
            .map(|plan| self.run_summary_plan(plan).boxed())
            .collect();
        let results = join_all(futures).await;
        log_failures(plans.iter().map(SummaryPlan::key), &results);
        results
    }
}
