//! Slug and word-casing helpers.

/// Turns a display name into a URL slug: lowercase ASCII words joined by
/// single dashes.
#[must_use]
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_dash = false;

    for ch in value.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else if ch != '\'' {
            pending_dash = true;
        }
    }

    slug
}

/// Splits a slug or identifier into lowercase words separated by spaces
/// (`violent-crime` -> `violent crime`).
#[must_use]
pub fn lower_case(value: &str) -> String {
    words(value)
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Capitalizes every word of a slug (`new-york` -> `New York`).
#[must_use]
pub fn title_case(value: &str) -> String {
    words(value)
        .map(|w| crime_explorer_models::upper_first(&w.to_lowercase()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn words(value: &str) -> impl Iterator<Item = &str> {
    value
        .split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|w| !w.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugifies_state_names() {
        assert_eq!(slugify("New York"), "new-york");
        assert_eq!(slugify("District of Columbia"), "district-of-columbia");
        assert_eq!(slugify("  Ohio "), "ohio");
    }

    #[test]
    fn slugify_drops_apostrophes_and_collapses_separators() {
        assert_eq!(slugify("Prince George's  County"), "prince-georges-county");
        assert_eq!(slugify("a--b"), "a-b");
    }

    #[test]
    fn lower_case_splits_slugs() {
        assert_eq!(lower_case("violent-crime"), "violent crime");
        assert_eq!(lower_case("motor_vehicle_theft"), "motor vehicle theft");
    }

    #[test]
    fn title_case_capitalizes_words() {
        assert_eq!(title_case("new-york"), "New York");
        assert_eq!(title_case("northeast"), "Northeast");
    }
}
