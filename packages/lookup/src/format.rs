//! Number formatting for narrative text and tables.

/// Formats an integer count with thousands separators (`12345` ->
/// `12,345`).
#[must_use]
pub fn format_num(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// Formats a rate with one decimal place and thousands separators
/// (`1234.56` -> `1,234.6`).
#[must_use]
pub fn format_one_dec(value: f64) -> String {
    let fixed = format!("{:.1}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "0"));
    let sign = if value < 0.0 && fixed != "0.0" { "-" } else { "" };
    format!("{sign}{}.{frac_part}", group_thousands(int_part))
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_counts() {
        assert_eq!(format_num(0), "0");
        assert_eq!(format_num(999), "999");
        assert_eq!(format_num(1000), "1,000");
        assert_eq!(format_num(1_234_567), "1,234,567");
    }

    #[test]
    fn formats_rates() {
        assert_eq!(format_one_dec(386.34), "386.3");
        assert_eq!(format_one_dec(1234.56), "1,234.6");
        assert_eq!(format_one_dec(0.0), "0.0");
        assert_eq!(format_one_dec(-2.26), "-2.3");
    }
}
