//! UI crime names and their API offense identifiers.
//!
//! The explorer routes use dash-separated crime slugs while the API's
//! `explorer_offense` parameter expects its own vocabulary.

/// UI crime slug and API offense identifier.
pub const OFFENSES: &[(&str, &str)] = &[
    ("violent-crime", "violent_crime"),
    ("homicide", "homicide"),
    ("rape", "rape_legacy"),
    ("rape-revised", "rape_revised"),
    ("robbery", "robbery"),
    ("aggravated-assault", "aggravated_assault"),
    ("property-crime", "property_crime"),
    ("burglary", "burglary"),
    ("larceny-theft", "larceny"),
    ("motor-vehicle-theft", "motor_vehicle_theft"),
    ("arson", "arson"),
];

/// Maps a UI crime slug to the API offense identifier.
///
/// Unknown crimes pass through unchanged.
#[must_use]
pub fn map_to_api_offense(crime: &str) -> &str {
    OFFENSES
        .iter()
        .find(|(ui, _)| *ui == crime)
        .map_or(crime, |&(_, api)| api)
}
