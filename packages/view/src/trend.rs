//! Offense trend chart details.
//!
//! Given the series points of the selected year (one per place, plus an
//! optional revised-definition rape point), builds the sentence shown
//! above the chart's table and the table rows themselves.

use std::fmt;

use crime_explorer_lookup::format::{format_num, format_one_dec};
use crime_explorer_lookup::{text, usa};
use crime_explorer_models::{NATIONAL_KEY, SeriesRecord};
use serde::Serialize;

/// Relative difference (in percent) below which two rates read as "about
/// the same".
pub const COMPARISON_THRESHOLD: f64 = 3.0;

/// Series crime name of the revised rape definition.
pub const RAPE_REVISED: &str = "rape-revised";

/// Fallback swatch color for rows beyond the caller's palette.
pub const DEFAULT_COLOR: &str = "#000";

/// How a place's rate compares to the national rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    /// Within [`COMPARISON_THRESHOLD`] percent.
    AboutTheSame,
    /// Above the national rate.
    Higher,
    /// Below the national rate.
    Lower,
}

impl Comparison {
    /// Classifies `place_rate` against `national_rate` by relative
    /// difference.
    #[must_use]
    pub fn classify(place_rate: f64, national_rate: f64) -> Self {
        let diff = (place_rate / national_rate - 1.0) * 100.0;
        if diff.abs() < COMPARISON_THRESHOLD {
            Self::AboutTheSame
        } else if diff > 0.0 {
            Self::Higher
        } else {
            Self::Lower
        }
    }

    /// The word emphasized in the sentence, if any.
    #[must_use]
    pub const fn highlight(self) -> Option<&'static str> {
        match self {
            Self::AboutTheSame => None,
            Self::Higher => Some("higher"),
            Self::Lower => Some("lower"),
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.highlight() {
            None => write!(f, "about the same (within {COMPARISON_THRESHOLD}%) as"),
            Some(word) => write!(f, "{word} than"),
        }
    }
}

/// The narrative sentence above the trend table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Sentence {
    /// Only the nation is shown.
    National {
        /// Selected year.
        year: Option<i32>,
        /// National rate.
        rate: Option<f64>,
        /// Crime slug.
        crime: String,
    },
    /// Rape under the legacy and revised definitions.
    RapeDefinitions {
        /// Selected year.
        year: Option<i32>,
        /// Legacy-definition rate.
        legacy_rate: Option<f64>,
        /// Revised-definition rate.
        revised_rate: f64,
    },
    /// A place without population data, described by its count.
    PlaceCount {
        /// Selected year.
        year: Option<i32>,
        /// Place slug or ORI.
        place: String,
        /// Crime slug.
        crime: String,
        /// Incident count.
        count: u64,
    },
    /// A place compared with the nation.
    PlaceComparison {
        /// Selected year.
        year: Option<i32>,
        /// Place slug.
        place: String,
        /// Crime slug.
        crime: String,
        /// Place rate.
        rate: Option<f64>,
        /// Classification, when both rates are known.
        comparison: Option<Comparison>,
    },
}

fn year_text(year: Option<i32>) -> String {
    year.map_or_else(|| "n/a".to_string(), |y| y.to_string())
}

fn rate_text(rate: Option<f64>) -> String {
    rate.map_or_else(|| "n/a".to_string(), format_one_dec)
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::National { year, rate, crime } => write!(
                f,
                "In {}, there were {} incidents of {} per 100,000 people.",
                year_text(*year),
                rate_text(*rate),
                text::lower_case(crime),
            ),
            Self::RapeDefinitions {
                year,
                legacy_rate,
                revised_rate,
            } => write!(
                f,
                "In {}, the rate at which rape was reported using the legacy definition \
                 was {} per 100,000. Rape was reported using the revised definition at a \
                 rate of {} per 100,000 people.",
                year_text(*year),
                rate_text(*legacy_rate),
                format_one_dec(*revised_rate),
            ),
            Self::PlaceCount {
                year,
                place,
                crime,
                count,
            } => write!(
                f,
                "In {}, {} reported {} incidents of {}.",
                year_text(*year),
                usa::display_name(place),
                format_num(*count),
                text::lower_case(crime),
            ),
            Self::PlaceComparison {
                year,
                place,
                crime,
                rate,
                comparison,
            } => {
                write!(
                    f,
                    "In {}, {}\u{2019}s {} rate was {} incidents per 100,000 people.",
                    year_text(*year),
                    usa::display_name(place),
                    text::lower_case(crime),
                    rate_text(*rate),
                )?;
                if let Some(comparison) = comparison {
                    write!(
                        f,
                        " The rate for that year was {comparison} that of the United States."
                    )?;
                }
                Ok(())
            }
        }
    }
}

/// One row of the trend table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    /// Place slug.
    pub place: String,
    /// Place display name.
    pub name: String,
    /// Formatted rate.
    pub rate: String,
    /// Formatted count.
    pub count: String,
    /// Swatch color.
    pub color: String,
}

/// Inputs to [`TrendDetails::build`].
#[derive(Debug, Clone, Copy)]
pub struct TrendInput<'a> {
    /// Series points of the selected year.
    pub active: &'a [SeriesRecord],
    /// Swatch colors by row index.
    pub colors: &'a [&'a str],
    /// Crime slug.
    pub crime: &'a str,
    /// Places being compared.
    pub keys: &'a [String],
    /// First selectable year.
    pub since: i32,
    /// Last selectable year.
    pub until: i32,
}

/// Sentence, table rows and selectable years for a trend chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendDetails {
    /// Narrative sentence.
    pub sentence: Sentence,
    /// Table rows in input order; callers sort as needed.
    pub rows: Vec<TableRow>,
    /// Years offered by the year selector.
    pub years: Vec<i32>,
}

impl TrendDetails {
    /// Builds the chart details.
    #[must_use]
    pub fn build(input: &TrendInput<'_>) -> Self {
        let data: Vec<&SeriesRecord> = input
            .active
            .iter()
            .filter(|d| d.crime != RAPE_REVISED)
            .collect();
        log::debug!(
            "trend details for {}: {} active, {} shown",
            input.crime,
            input.active.len(),
            data.len()
        );

        let is_national = input.keys.len() == 1;
        let place = if is_national {
            NATIONAL_KEY
        } else {
            input
                .keys
                .iter()
                .map(String::as_str)
                .find(|k| *k != NATIONAL_KEY)
                .unwrap_or(NATIONAL_KEY)
        };

        let current = data.iter().find(|d| d.place == place);
        let year = current.map(|d| d.year);
        let rate = current.and_then(|d| d.rate);
        let count = current.and_then(|d| d.count);
        let revised = input
            .active
            .iter()
            .find(|d| d.crime == RAPE_REVISED && d.place == place);

        let sentence = if is_national {
            Sentence::National {
                year,
                rate,
                crime: input.crime.to_string(),
            }
        } else if let Some(revised_rate) = revised
            .and_then(|r| r.rate)
            .filter(|r| input.crime == "rape" && *r != 0.0)
        {
            Sentence::RapeDefinitions {
                year,
                legacy_rate: rate,
                revised_rate,
            }
        } else if let (None, Some(count)) = (rate, count) {
            Sentence::PlaceCount {
                year,
                place: place.to_string(),
                crime: input.crime.to_string(),
                count,
            }
        } else {
            Sentence::PlaceComparison {
                year,
                place: place.to_string(),
                crime: input.crime.to_string(),
                rate,
                comparison: compare(place, &data),
            }
        };
        log::debug!("trend sentence: {sentence:?}");

        let rows = data
            .iter()
            .enumerate()
            .map(|(i, d)| TableRow {
                place: d.place.clone(),
                name: usa::display_name(&d.place),
                rate: rate_text(d.rate),
                count: d.count.map_or_else(|| "n/a".to_string(), format_num),
                color: input.colors.get(i).copied().unwrap_or(DEFAULT_COLOR).to_string(),
            })
            .collect();

        Self {
            sentence,
            rows,
            years: (input.since..=input.until).collect(),
        }
    }
}

/// Compares the place's rate with the other row's rate. The last row not
/// belonging to `place` is taken as the national rate.
fn compare(place: &str, data: &[&SeriesRecord]) -> Option<Comparison> {
    let mut place_rate = None;
    let mut national_rate = None;
    for d in data {
        if d.place == place {
            place_rate = d.rate;
        } else {
            national_rate = d.rate;
        }
    }

    match (place_rate, national_rate) {
        (Some(p), Some(n)) if n != 0.0 => Some(Comparison::classify(p, n)),
        _ => None,
    }
}
