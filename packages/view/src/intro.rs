//! Explorer intro selection.
//!
//! Exactly one intro is shown per page, chosen in priority order:
//!
//! 1. agency metadata present -> agency intro
//! 2. participation still loading -> nothing
//! 3. participation failed -> error card
//! 4. national sentinel place -> national intro
//! 5. region place type -> region intro
//! 6. otherwise -> state intro

use std::collections::BTreeMap;
use std::fmt;

use crime_explorer_api::{ApiError, format_error};
use crime_explorer_lookup::{states, text, usa::Region};
use crime_explorer_models::{AgencyRecord, Filters, NATIONAL_KEY, PlaceResults, PlaceType, Record};
use serde::Serialize;

/// Error shown in place of an intro.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorCard {
    /// Failure message.
    pub message: String,
    /// HTTP status, when the failure had a response.
    pub code: Option<u16>,
    /// URL that failed, when known.
    pub url: Option<String>,
}

impl From<&ApiError> for ErrorCard {
    fn from(error: &ApiError) -> Self {
        format_error(error).map_or_else(
            || Self {
                message: error.to_string(),
                code: None,
                url: None,
            },
            |formatted| Self {
                message: formatted.message,
                code: Some(formatted.code),
                url: Some(formatted.url),
            },
        )
    }
}

impl fmt::Display for ErrorCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.code, &self.url) {
            (Some(code), Some(url)) => write!(f, "Error {code}: {} ({url})", self.message),
            _ => write!(f, "Error: {}", self.message),
        }
    }
}

/// Participation state as held by the page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Participation {
    /// Requests are still in flight.
    pub loading: bool,
    /// The first failed request, if any.
    pub error: Option<ErrorCard>,
    /// Participation rows by place.
    pub data: BTreeMap<String, Vec<Record>>,
}

impl Participation {
    /// State while requests are in flight.
    #[must_use]
    pub fn loading() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    /// Collects a participation batch; the first failure becomes the
    /// page's error.
    #[must_use]
    pub fn from_results(results: Vec<Result<PlaceResults, ApiError>>) -> Self {
        let mut participation = Self::default();
        for result in results {
            match result {
                Ok(place) => {
                    participation.data.insert(place.place, place.results);
                }
                Err(e) => {
                    if participation.error.is_none() {
                        participation.error = Some(ErrorCard::from(&e));
                    }
                }
            }
        }
        participation
    }

    fn rows(&self, place: &str) -> Option<&[Record]> {
        self.data.get(place).map(Vec::as_slice)
    }
}

/// Everything the intro selector looks at.
#[derive(Debug, Clone, Copy)]
pub struct IntroContext<'a> {
    /// Agency metadata, on agency pages.
    pub agency: Option<&'a AgencyRecord>,
    /// Current navigation context.
    pub filters: &'a Filters,
    /// Participation state.
    pub participation: &'a Participation,
    /// Display name of the current place.
    pub place_name: &'a str,
    /// Region lookup row, on region pages.
    pub region: Option<&'a Record>,
    /// State lookup rows, on region pages.
    pub states: Option<&'a [Record]>,
}

/// The selected intro variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum IntroView<'a> {
    /// A single agency.
    Agency {
        /// County the agency serves.
        county: Option<&'a str>,
        /// Current crime.
        crime: &'a str,
        /// Whether the agency reported NIBRS for all twelve months.
        has_nibrs: bool,
        /// Agency name.
        name: &'a str,
        /// State the agency reports through.
        us_state: Option<&'static str>,
        /// Agency type.
        agency_type: Option<&'a str>,
    },
    /// The nation.
    National {
        /// Current crime.
        crime: &'a str,
        /// Last year of the window.
        until: i32,
        /// Current page.
        page: Option<&'a str>,
        /// National participation rows.
        participation: Option<&'a [Record]>,
    },
    /// A census region.
    Region {
        /// Current crime.
        crime: &'a str,
        /// Last year of the window.
        until: i32,
        /// Region display name.
        place_name: &'a str,
        /// Region participation rows.
        participation: Option<&'a [Record]>,
        /// Member states.
        states: Option<&'a [Record]>,
        /// Region lookup row.
        region: Option<&'a Record>,
        /// Current page.
        page: Option<&'a str>,
        /// Region slug.
        place: &'a str,
    },
    /// A state.
    State {
        /// Current crime.
        crime: &'a str,
        /// State slug.
        place: &'a str,
        /// Last year of the window.
        until: i32,
        /// Current page.
        page: Option<&'a str>,
        /// State participation rows.
        participation: Option<&'a [Record]>,
        /// State display name.
        place_name: &'a str,
    },
    /// Participation failed to load.
    Error(&'a ErrorCard),
}

/// Picks the intro for a page, or `None` while participation is loading.
#[must_use]
pub fn select_intro<'a>(ctx: &IntroContext<'a>) -> Option<IntroView<'a>> {
    let filters = ctx.filters;

    if let Some(agency) = ctx.agency {
        return Some(IntroView::Agency {
            county: agency.primary_county.as_deref(),
            crime: &filters.page_type,
            has_nibrs: agency.nibrs_months_reported == Some(12),
            name: &agency.agency_name,
            us_state: states::ori_to_state(&filters.place),
            agency_type: agency.agency_type_name.as_deref(),
        });
    }

    let participation = ctx.participation;
    if participation.loading {
        return None;
    }

    if let Some(error) = &participation.error {
        return Some(IntroView::Error(error));
    }

    if filters.is_national() {
        return Some(IntroView::National {
            crime: &filters.page_type,
            until: filters.until,
            page: filters.page.as_deref(),
            participation: participation.rows(NATIONAL_KEY),
        });
    }

    if filters.place_type == PlaceType::Region {
        return Some(IntroView::Region {
            crime: &filters.page_type,
            until: filters.until,
            place_name: ctx.place_name,
            participation: participation.rows(&filters.place),
            states: ctx.states,
            region: ctx.region,
            page: filters.page.as_deref(),
            place: &filters.place,
        });
    }

    Some(IntroView::State {
        crime: &filters.page_type,
        place: &filters.place,
        until: filters.until,
        page: filters.page.as_deref(),
        participation: participation.rows(&filters.place),
        place_name: ctx.place_name,
    })
}

/// Participating vs. total agencies for a year, when the rows carry them.
fn agencies_reporting(rows: Option<&[Record]>, year: i32) -> Option<(u64, u64)> {
    let row = rows?
        .iter()
        .find(|r| r.get("year").and_then(serde_json::Value::as_i64) == Some(i64::from(year)))?;
    let participating = row.get("participating_agencies")?.as_u64()?;
    let total = row.get("total_agencies")?.as_u64()?;
    Some((participating, total))
}

fn write_participation(
    f: &mut fmt::Formatter<'_>,
    rows: Option<&[Record]>,
    year: i32,
) -> fmt::Result {
    if let Some((participating, total)) = agencies_reporting(rows, year) {
        write!(
            f,
            " In {year}, {participating} of {total} law enforcement agencies submitted data."
        )?;
    }
    Ok(())
}

impl fmt::Display for IntroView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Agency {
                county,
                crime,
                has_nibrs,
                name,
                us_state,
                agency_type,
            } => {
                write!(f, "{name}")?;
                if let Some(agency_type) = agency_type {
                    write!(f, " is a {} agency", agency_type.to_lowercase())?;
                } else {
                    write!(f, " is an agency")?;
                }
                match (county, us_state) {
                    (Some(county), Some(state)) => write!(f, " in {county} County, {state}.")?,
                    (None, Some(state)) => write!(f, " in {state}.")?,
                    (Some(county), None) => write!(f, " in {county} County.")?,
                    _ => write!(f, ".")?,
                }
                let reports = if *has_nibrs { "reports" } else { "does not report" };
                write!(
                    f,
                    " It {reports} incident-based (NIBRS) data for {}.",
                    text::lower_case(crime)
                )
            }
            Self::National {
                crime,
                until,
                participation,
                ..
            } => {
                write!(
                    f,
                    "{} in the United States through {until}.",
                    crime_explorer_models::upper_first(&text::lower_case(crime))
                )?;
                write_participation(f, *participation, *until)
            }
            Self::Region {
                crime,
                until,
                place_name,
                participation,
                states,
                place,
                ..
            } => {
                let name = if place_name.is_empty() {
                    place
                        .parse::<Region>()
                        .map_or_else(|_| text::title_case(place), |r| r.display().to_string())
                } else {
                    (*place_name).to_string()
                };
                write!(
                    f,
                    "{} in the {name} region through {until}.",
                    crime_explorer_models::upper_first(&text::lower_case(crime))
                )?;
                if let Some(states) = states {
                    write!(f, " The region includes {} states.", states.len())?;
                }
                write_participation(f, *participation, *until)
            }
            Self::State {
                crime,
                until,
                participation,
                place_name,
                ..
            } => {
                write!(
                    f,
                    "{} in {place_name} through {until}.",
                    crime_explorer_models::upper_first(&text::lower_case(crime))
                )?;
                write_participation(f, *participation, *until)
            }
            Self::Error(card) => write!(f, "{card}"),
        }
    }
}
