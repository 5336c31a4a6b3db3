//! Display names for explorer places.
//!
//! A place slug is either the national sentinel, a census region, or a
//! state slug. Anything else (agency ORIs, unknown slugs) is title-cased.

use crime_explorer_models::NATIONAL_KEY;
use strum_macros::{AsRefStr, Display, EnumString};

use crate::{states, text};

/// The four census regions used by the UCR program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Region {
    /// New England and Mid-Atlantic states.
    Northeast,
    /// East and West North Central states.
    Midwest,
    /// South Atlantic and South Central states.
    South,
    /// Mountain and Pacific states.
    West,
}

impl Region {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Northeast, Self::Midwest, Self::South, Self::West]
    }

    /// Human-readable region name.
    #[must_use]
    pub const fn display(self) -> &'static str {
        match self {
            Self::Northeast => "Northeast",
            Self::Midwest => "Midwest",
            Self::South => "South",
            Self::West => "West",
        }
    }
}

/// Returns the display name for a place slug.
#[must_use]
pub fn display_name(place: &str) -> String {
    if place == NATIONAL_KEY {
        return "United States".to_string();
    }

    if let Ok(region) = place.parse::<Region>() {
        return region.display().to_string();
    }

    if let Some(name) = states::slug_to_abbr(place).and_then(states::state_name) {
        return name.to_string();
    }

    // Agency ORIs are shown as-is.
    if place.bytes().any(|b| b.is_ascii_digit()) {
        return place.to_string();
    }

    text::title_case(place)
}
