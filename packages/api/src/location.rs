//! URL building rules shared by every place-scoped fetcher.

use crime_explorer_models::{PlaceRef, PlaceType};

/// Maps UI dimension names to the API's field path segment.
pub const DIMENSION_ALIASES: &[(&str, &str)] = &[
    ("ageNum", "age_num"),
    ("locationName", "location_name"),
    ("offenseName", "offense_name"),
    ("raceCode", "race_code"),
    ("relationship", "offender_relationship"),
    ("sexCode", "sex_code"),
];

/// Location path segment for a place.
///
/// - national sentinel -> `national`
/// - agency -> `agencies/{place}`
/// - anything else -> `states/{place_id}`
#[must_use]
pub fn location_segment(place: PlaceRef<'_>) -> String {
    if place.is_national() {
        "national".to_string()
    } else if place.place_type == PlaceType::Agency {
        format!("agencies/{}", place.place)
    } else {
        format!("states/{}", place.place_id)
    }
}

/// API field name for a dimension; unknown names pass through.
#[must_use]
pub fn dimension_field(dim: &str) -> &str {
    DIMENSION_ALIASES
        .iter()
        .find(|(ui, _)| *ui == dim)
        .map_or(dim, |&(_, api)| api)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(place_type: PlaceType) -> PlaceRef<'static> {
        PlaceRef {
            place: "OH0180000",
            place_type,
            place_id: "OH",
        }
    }

    #[test]
    fn national_sentinel_wins_over_place_type() {
        for place_type in [
            PlaceType::State,
            PlaceType::Agency,
            PlaceType::Region,
            PlaceType::National,
        ] {
            let national = PlaceRef {
                place_type,
                ..PlaceRef::national()
            };
            assert_eq!(location_segment(national), "national");
        }
    }

    #[test]
    fn agency_uses_place() {
        assert_eq!(
            location_segment(place(PlaceType::Agency)),
            "agencies/OH0180000"
        );
    }

    #[test]
    fn everything_else_uses_place_id() {
        for place_type in [PlaceType::State, PlaceType::Region, PlaceType::National] {
            assert_eq!(location_segment(place(place_type)), "states/OH");
        }
    }

    #[test]
    fn dimension_aliases() {
        assert_eq!(dimension_field("ageNum"), "age_num");
        assert_eq!(dimension_field("locationName"), "location_name");
        assert_eq!(dimension_field("offenseName"), "offense_name");
        assert_eq!(dimension_field("raceCode"), "race_code");
        assert_eq!(dimension_field("relationship"), "offender_relationship");
        assert_eq!(dimension_field("sexCode"), "sex_code");
    }

    #[test]
    fn unknown_dimensions_pass_through() {
        assert_eq!(dimension_field("ethnicity"), "ethnicity");
        assert_eq!(dimension_field("relationships"), "relationships");
        assert_eq!(dimension_field(""), "");
    }

    #[test]
    fn every_place_scoped_fetcher_uses_the_same_location() {
        use crime_explorer_models::{Filters, NATIONAL_KEY};

        let cases = [
            (NATIONAL_KEY, PlaceType::National, "/national"),
            (NATIONAL_KEY, PlaceType::State, "/national"),
            ("OH0180000", PlaceType::Agency, "/agencies/OH0180000"),
            ("ohio", PlaceType::State, "/states/OH"),
            ("midwest", PlaceType::Region, "/states/OH"),
            ("ohio", PlaceType::National, "/states/OH"),
        ];

        for (place, place_type, expected) in cases {
            let filters = Filters {
                place: place.to_string(),
                place_type,
                place_id: "OH".to_string(),
                page_type: "officers-killed".to_string(),
                page: None,
                since: 2010,
                until: 2016,
            };

            let planned = crate::nibrs::plan_breakdowns(&filters)
                .into_iter()
                .chain(crate::nibrs::plan_counts(&filters))
                .chain(crate::leoka::plan_leoka(&filters));

            for request in planned {
                let matches = ["/national", "/agencies/", "/states/"]
                    .iter()
                    .filter(|segment| request.path.contains(*segment))
                    .count();
                assert_eq!(matches, 1, "{} has ambiguous location", request.path);
                assert!(
                    request.path.contains(&format!("{expected}/"))
                        || request.path.ends_with(expected),
                    "{} does not use {expected} for {place_type}",
                    request.path
                );
            }
        }
    }
}
