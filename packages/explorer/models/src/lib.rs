#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared types for the crime data explorer.
//!
//! Defines the navigation [`Filters`] that drive every page, the static
//! request descriptors ([`Slice`], [`Dimension`]) used to fan out API
//! calls, and the normalized result shapes handed to the presentation
//! layer.

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Place slug that stands for the whole United States.
pub const NATIONAL_KEY: &str = "united-states";

/// A single upstream record with its fields preserved verbatim.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Kind of place the explorer is currently showing.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PlaceType {
    /// A US state, addressed upstream by its place ID.
    State,
    /// A single reporting agency, addressed by its ORI.
    Agency,
    /// A census region (e.g. `northeast`).
    Region,
    /// The whole country.
    #[default]
    National,
}

impl PlaceType {
    /// Parses a place type, falling back to [`PlaceType::National`] for
    /// anything unrecognized.
    #[must_use]
    pub fn parse_or_national(value: &str) -> Self {
        Self::from_str(value).unwrap_or(Self::National)
    }
}

fn place_type_or_national<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PlaceType, D::Error> {
    let value = String::deserialize(deserializer)?;
    Ok(PlaceType::parse_or_national(&value))
}

/// Navigation context for the current page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filters {
    /// Place slug, ORI, or [`NATIONAL_KEY`].
    pub place: String,
    /// What kind of place `place` names; unrecognized values read as
    /// national.
    #[serde(default, deserialize_with = "place_type_or_national")]
    pub place_type: PlaceType,
    /// Upstream identifier for states (`states/{place_id}`).
    #[serde(default)]
    pub place_id: String,
    /// Crime or page category (e.g. `violent-crime`, `officers-assaulted`).
    pub page_type: String,
    /// Page within the explorer (e.g. `crime`, `police`).
    #[serde(default)]
    pub page: Option<String>,
    /// First year of the selected window.
    pub since: i32,
    /// Last year of the selected window (inclusive).
    pub until: i32,
}

impl Filters {
    /// Whether the current place is the national sentinel.
    #[must_use]
    pub fn is_national(&self) -> bool {
        self.place == NATIONAL_KEY
    }

    /// Borrows the place triple used for URL routing.
    #[must_use]
    pub fn place_ref(&self) -> PlaceRef<'_> {
        PlaceRef {
            place: &self.place,
            place_type: self.place_type,
            place_id: &self.place_id,
        }
    }
}

/// The `{place, place_type, place_id}` triple that selects upstream
/// location paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceRef<'a> {
    /// Place slug, ORI, or [`NATIONAL_KEY`].
    pub place: &'a str,
    /// What kind of place `place` names.
    pub place_type: PlaceType,
    /// Upstream identifier for states.
    pub place_id: &'a str,
}

impl PlaceRef<'static> {
    /// The whole country.
    #[must_use]
    pub const fn national() -> Self {
        Self {
            place: NATIONAL_KEY,
            place_type: PlaceType::National,
            place_id: "",
        }
    }
}

impl PlaceRef<'_> {
    /// Whether this is the national sentinel place.
    #[must_use]
    pub fn is_national(&self) -> bool {
        self.place == NATIONAL_KEY
    }
}

/// Which side of an incident a NIBRS facet describes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Facet {
    /// Offender demographics.
    Offender,
    /// Victim demographics.
    Victim,
    /// Offense attributes.
    Offense,
}

/// The breakdown dimension of a facet request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Totals only; the dimension path segment is omitted.
    NoDimension,
    /// A named breakdown such as `raceCode` or `age`.
    Named(&'static str),
}

impl Dimension {
    /// The dimension name as used in result keys (empty for
    /// [`Dimension::NoDimension`]).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NoDimension => "",
            Self::Named(name) => name,
        }
    }
}

/// One `{type, dim}` request descriptor from a static catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slice {
    /// Facet being broken down.
    pub facet: Facet,
    /// Breakdown dimension.
    pub dim: Dimension,
}

impl Slice {
    /// Creates a slice with a named dimension.
    #[must_use]
    pub const fn named(facet: Facet, dim: &'static str) -> Self {
        Self {
            facet,
            dim: Dimension::Named(dim),
        }
    }

    /// Creates a totals-only slice.
    #[must_use]
    pub const fn totals(facet: Facet) -> Self {
        Self {
            facet,
            dim: Dimension::NoDimension,
        }
    }

    /// Result key for this slice, e.g. `victimRaceCode` or `offender`.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}{}", self.facet, upper_first(self.dim.name()))
    }
}

/// Uppercases the first character, leaving the rest untouched.
#[must_use]
pub fn upper_first(value: &str) -> String {
    let mut chars = value.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Paginated response envelope returned by every endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T = Record> {
    /// The page of records.
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// A facet breakdown keyed by `{facet}{Dim}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyedData {
    /// Lookup key for the facet.
    pub key: String,
    /// Breakdown rows.
    pub data: Vec<Record>,
}

/// A per-place record bundle keyed by a place identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyedResults<T = Record> {
    /// Place slug, ORI, or [`NATIONAL_KEY`].
    pub key: String,
    /// Rows for that place.
    pub results: Vec<T>,
}

/// Participation rows for one place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceResults {
    /// Place the rows belong to.
    pub place: String,
    /// Participation rows.
    pub results: Vec<Record>,
}

/// Unkeyed lookup rows (regions, states).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupResults {
    /// Lookup rows.
    pub results: Vec<Record>,
}

/// An arson row; only `year` and `actual` are used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArsonRecord {
    /// Data year.
    pub year: i32,
    /// Reported arson count.
    #[serde(default)]
    pub actual: Option<i64>,
}

/// An estimates row with arson joined in.
///
/// All upstream fields other than `year` and `arson` are kept in
/// `fields` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateRecord {
    /// Data year.
    pub year: i32,
    /// Arson count for the same year, if any was reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arson: Option<i64>,
    /// Remaining upstream fields.
    #[serde(flatten)]
    pub fields: Record,
}

/// One point of an offense trend series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesRecord {
    /// Data year.
    pub year: i32,
    /// Incidents per 100,000 people.
    #[serde(default)]
    pub rate: Option<f64>,
    /// Incident count.
    #[serde(default)]
    pub count: Option<u64>,
    /// Place the point belongs to.
    pub place: String,
    /// Crime the point measures (e.g. `rape`, `rape-revised`).
    pub crime: String,
    /// Arson count, for property-crime series.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arson: Option<i64>,
}

/// Agency metadata shown in the agency intro.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgencyRecord {
    /// Agency display name.
    pub agency_name: String,
    /// Agency type (e.g. `City`, `County`).
    #[serde(default)]
    pub agency_type_name: Option<String>,
    /// County the agency primarily serves.
    #[serde(default)]
    pub primary_county: Option<String>,
    /// Months of NIBRS data reported in the latest year.
    #[serde(default)]
    pub nibrs_months_reported: Option<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_key_capitalizes_dimension() {
        assert_eq!(
            Slice::named(Facet::Victim, "raceCode").key(),
            "victimRaceCode"
        );
        assert_eq!(Slice::named(Facet::Offense, "locationName").key(), "offenseLocationName");
    }

    #[test]
    fn totals_slice_key_is_facet_only() {
        assert_eq!(Slice::totals(Facet::Offender).key(), "offender");
    }

    #[test]
    fn upper_first_handles_edges() {
        assert_eq!(upper_first(""), "");
        assert_eq!(upper_first("a"), "A");
        assert_eq!(upper_first("assign-dist"), "Assign-dist");
    }

    #[test]
    fn unknown_place_type_is_national() {
        assert_eq!(PlaceType::parse_or_national("state"), PlaceType::State);
        assert_eq!(PlaceType::parse_or_national("agency"), PlaceType::Agency);
        assert_eq!(PlaceType::parse_or_national("county"), PlaceType::National);
    }

    #[test]
    fn filters_deserialize_from_camel_case() {
        let filters: Filters = serde_json::from_str(
            r#"{"place":"ohio","placeType":"state","placeId":"OH","pageType":"robbery","since":2010,"until":2016}"#,
        )
        .unwrap();
        assert_eq!(filters.place_type, PlaceType::State);
        assert_eq!(filters.place_id, "OH");
        assert!(!filters.is_national());
        assert_eq!(filters.place_ref().place, "ohio");
    }

    #[test]
    fn unrecognized_place_type_deserializes_as_national() {
        let filters: Filters = serde_json::from_str(
            r#"{"place":"guam","placeType":"territory","pageType":"robbery","since":2010,"until":2016}"#,
        )
        .unwrap();
        assert_eq!(filters.place_type, PlaceType::National);

        let filters: Filters = serde_json::from_str(
            r#"{"place":"guam","pageType":"robbery","since":2010,"until":2016}"#,
        )
        .unwrap();
        assert_eq!(filters.place_type, PlaceType::National);
    }

    #[test]
    fn estimate_record_keeps_unknown_fields() {
        let record: EstimateRecord =
            serde_json::from_str(r#"{"year":2014,"population":1000,"robbery":12}"#).unwrap();
        assert_eq!(record.year, 2014);
        assert_eq!(record.arson, None);
        assert_eq!(record.fields.get("robbery"), Some(&serde_json::json!(12)));

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value.get("arson"), None);
        assert_eq!(value.get("population"), Some(&serde_json::json!(1000)));
    }

    #[test]
    fn envelope_tolerates_missing_results() {
        let envelope: Envelope = serde_json::from_str(r#"{"pagination":{"count":0}}"#).unwrap();
        assert!(envelope.results.is_empty());
    }
}
