//! US state abbreviations, names and ORI prefixes.
//!
//! Covers the 50 states + DC. Every ORI starts with the two-letter
//! abbreviation of the state the agency reports through, so the state of
//! an agency can be derived from its ORI alone.

use crate::text::slugify;

/// Two-letter abbreviation and full name for the 50 states + DC.
pub const STATES: &[(&str, &str)] = &[
    ("AL", "Alabama"),
    ("AK", "Alaska"),
    ("AZ", "Arizona"),
    ("AR", "Arkansas"),
    ("CA", "California"),
    ("CO", "Colorado"),
    ("CT", "Connecticut"),
    ("DE", "Delaware"),
    ("DC", "District of Columbia"),
    ("FL", "Florida"),
    ("GA", "Georgia"),
    ("HI", "Hawaii"),
    ("ID", "Idaho"),
    ("IL", "Illinois"),
    ("IN", "Indiana"),
    ("IA", "Iowa"),
    ("KS", "Kansas"),
    ("KY", "Kentucky"),
    ("LA", "Louisiana"),
    ("ME", "Maine"),
    ("MD", "Maryland"),
    ("MA", "Massachusetts"),
    ("MI", "Michigan"),
    ("MN", "Minnesota"),
    ("MS", "Mississippi"),
    ("MO", "Missouri"),
    ("MT", "Montana"),
    ("NE", "Nebraska"),
    ("NV", "Nevada"),
    ("NH", "New Hampshire"),
    ("NJ", "New Jersey"),
    ("NM", "New Mexico"),
    ("NY", "New York"),
    ("NC", "North Carolina"),
    ("ND", "North Dakota"),
    ("OH", "Ohio"),
    ("OK", "Oklahoma"),
    ("OR", "Oregon"),
    ("PA", "Pennsylvania"),
    ("RI", "Rhode Island"),
    ("SC", "South Carolina"),
    ("SD", "South Dakota"),
    ("TN", "Tennessee"),
    ("TX", "Texas"),
    ("UT", "Utah"),
    ("VT", "Vermont"),
    ("VA", "Virginia"),
    ("WA", "Washington"),
    ("WV", "West Virginia"),
    ("WI", "Wisconsin"),
    ("WY", "Wyoming"),
];

/// Maps a two-letter abbreviation (any case) to the state name.
#[must_use]
pub fn state_name(abbr: &str) -> Option<&'static str> {
    STATES
        .iter()
        .find(|(a, _)| a.eq_ignore_ascii_case(abbr))
        .map(|(_, name)| *name)
}

/// Maps a state slug (e.g. `new-york`) to its abbreviation.
#[must_use]
pub fn slug_to_abbr(slug: &str) -> Option<&'static str> {
    STATES
        .iter()
        .find(|(_, name)| slugify(name) == slug)
        .map(|(abbr, _)| *abbr)
}

/// Returns the abbreviation of the state an ORI reports through.
#[must_use]
pub fn ori_to_state_abbr(ori: &str) -> Option<&'static str> {
    let prefix = ori.get(..2)?;
    STATES
        .iter()
        .find(|(a, _)| a.eq_ignore_ascii_case(prefix))
        .map(|(abbr, _)| *abbr)
}

/// Returns the name of the state an ORI reports through.
#[must_use]
pub fn ori_to_state(ori: &str) -> Option<&'static str> {
    ori_to_state_abbr(ori).and_then(state_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_count() {
        assert_eq!(STATES.len(), 51);
    }

    #[test]
    fn slug_roundtrip() {
        for (abbr, name) in STATES {
            assert_eq!(
                slug_to_abbr(&slugify(name)),
                Some(*abbr),
                "roundtrip failed for {name}"
            );
        }
    }

    #[test]
    fn ori_prefix_resolves_state() {
        assert_eq!(ori_to_state("OH0180000"), Some("Ohio"));
        assert_eq!(ori_to_state("ny0303000"), Some("New York"));
        assert_eq!(ori_to_state_abbr("DC0010100"), Some("DC"));
    }

    #[test]
    fn unknown_ori_prefix() {
        assert_eq!(ori_to_state("XX0000000"), None);
        assert_eq!(ori_to_state("O"), None);
        assert_eq!(ori_to_state(""), None);
    }

    #[test]
    fn case_insensitive_state_name() {
        assert_eq!(state_name("ca"), Some("California"));
        assert_eq!(state_name("Ca"), Some("California"));
        assert_eq!(state_name("ZZ"), None);
    }
}
