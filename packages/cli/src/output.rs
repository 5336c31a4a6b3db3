//! Terminal output helpers.

use crime_explorer_api::{ApiError, format_error};
use crime_explorer_view::trend::TableRow;
use serde::Serialize;

/// Prints a value as pretty JSON on stdout.
pub fn print_json<S: Serialize + ?Sized>(value: &S) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Prints a failed slot on stderr, with status and URL when known.
pub fn print_error(error: &ApiError) {
    match format_error(error) {
        Some(formatted) => eprintln!(
            "error {}: {} ({})",
            formatted.code, formatted.message, formatted.url
        ),
        None => eprintln!("error: {error}"),
    }
}

/// Prints every successful slot as JSON and every failed one as an
/// error line, in slot order.
pub fn print_slots<T: Serialize>(results: &[Result<T, ApiError>]) -> Result<(), serde_json::Error> {
    for result in results {
        match result {
            Ok(value) => print_json(value)?,
            Err(e) => print_error(e),
        }
    }
    Ok(())
}

pub fn print_trend_table(rows: &[TableRow]) {
    println!("{:<30} {:>12} {:>14}  COLOR", "PLACE", "RATE", "COUNT");
    println!("{}", "-".repeat(66));
    for row in rows {
        println!(
            "{:<30} {:>12} {:>14}  {}",
            row.name, row.rate, row.count, row.color
        );
    }
}
