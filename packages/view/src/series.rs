//! Turns estimates and agency offense rows into trend series points.

use std::collections::BTreeMap;

use crime_explorer_api::summary::SummaryResult;
use crime_explorer_lookup::offenses::map_to_api_offense;
use crime_explorer_models::{EstimateRecord, Record, SeriesRecord};

use crate::trend::RAPE_REVISED;

const PER_CAPITA: f64 = 100_000.0;

fn field_count(record: &EstimateRecord, field: &str) -> Option<u64> {
    if field == "arson" {
        return record.arson.and_then(|n| u64::try_from(n).ok());
    }
    record.fields.get(field).and_then(serde_json::Value::as_u64)
}

#[allow(clippy::cast_precision_loss)]
fn point(record: &EstimateRecord, place: &str, crime: &str, field: &str) -> SeriesRecord {
    let count = field_count(record, field);
    let population = record
        .fields
        .get("population")
        .and_then(serde_json::Value::as_u64)
        .filter(|p| *p > 0);
    let rate = count
        .zip(population)
        .map(|(count, population)| count as f64 / population as f64 * PER_CAPITA);

    SeriesRecord {
        year: record.year,
        rate,
        count,
        place: place.to_string(),
        crime: crime.to_string(),
        arson: record.arson,
    }
}

/// Builds one series point per estimates row for `crime` at `place`.
///
/// Rates are incidents per 100,000 residents. Rows without a count or
/// population keep the point with `None` values. Rape additionally gets a
/// `rape-revised` point per year from the revised-definition field.
#[must_use]
pub fn to_series(place: &str, crime: &str, records: &[EstimateRecord]) -> Vec<SeriesRecord> {
    let field = map_to_api_offense(crime);
    let mut series: Vec<SeriesRecord> = records
        .iter()
        .map(|r| point(r, place, crime, field))
        .collect();

    if crime == "rape" {
        series.extend(
            records
                .iter()
                .map(|r| point(r, place, RAPE_REVISED, "rape_revised")),
        );
    }
    series
}

/// Builds a count-only series from an agency's offense rows.
///
/// Agencies have no population, so `rate` stays `None`. Rows are summed
/// per `data_year` (or `year`); rows without a year or `actual` count are
/// skipped.
#[must_use]
pub fn agency_series(ori: &str, crime: &str, rows: &[Record]) -> Vec<SeriesRecord> {
    let mut by_year: BTreeMap<i32, u64> = BTreeMap::new();
    for row in rows {
        let year = row
            .get("data_year")
            .or_else(|| row.get("year"))
            .and_then(serde_json::Value::as_i64)
            .and_then(|y| i32::try_from(y).ok());
        let count = row.get("actual").and_then(serde_json::Value::as_u64);
        if let (Some(year), Some(count)) = (year, count) {
            *by_year.entry(year).or_default() += count;
        }
    }

    by_year
        .into_iter()
        .map(|(year, count)| SeriesRecord {
            year,
            rate: None,
            count: Some(count),
            place: ori.to_string(),
            crime: crime.to_string(),
            arson: None,
        })
        .collect()
}

/// Turns resolved summary slots into trend keys and series points, in
/// slot order. On agency pages the agency comes first, so it becomes the
/// described place.
#[must_use]
pub fn summary_series(crime: &str, slots: &[SummaryResult]) -> (Vec<String>, Vec<SeriesRecord>) {
    let mut keys = Vec::with_capacity(slots.len());
    let mut series = Vec::new();
    for slot in slots {
        match slot {
            SummaryResult::AgencyOffenses(offenses) => {
                series.extend(agency_series(&offenses.key, crime, &offenses.results));
            }
            SummaryResult::Aggregates(aggregates) => {
                series.extend(to_series(&aggregates.key, crime, &aggregates.results));
            }
        }
        keys.push(slot.key().to_string());
    }
    (keys, series)
}

/// Points of one year across the given series.
#[must_use]
pub fn active_year(series: &[SeriesRecord], year: i32) -> Vec<SeriesRecord> {
    series.iter().filter(|p| p.year == year).cloned().collect()
}
