//! Date normalization for extracted invoice fields.

use chrono::NaiveDate;
use tracing::debug;

use crate::models::invoice::UNKNOWN;

/// Accepted input formats, tried in order. First match wins, so the
/// order is part of the contract: `17-06-2024` must read as day-month
/// while `06/17/2024` still has a US fallback.
const FORMATS: [&str; 11] = [
    "%d-%b-%y",  // 17-Jun-24
    "%d-%b-%Y",  // 17-Jun-2024
    "%d-%m-%Y",  // 17-06-2024
    "%d.%m.%Y",  // 17.06.2024
    "%d/%m/%Y",  // 17/06/2024
    "%Y-%m-%d",  // 2024-06-17
    "%m/%d/%Y",  // 06/17/2024
    "%B %d, %Y", // June 17, 2024
    "%b %d, %Y", // Jun 17, 2024
    "%d %B %Y",  // 17 June 2024
    "%d %b %Y",  // 17 Jun 2024
];

/// Canonical storage format.
pub const ISO_FORMAT: &str = "%Y-%m-%d";

/// Default display format.
pub const DISPLAY_FORMAT: &str = "%d-%m-%Y";

/// Parse a date written in any accepted format.
///
/// Returns `None` for empty input, the `Unknown` sentinel, and anything
/// no format accepts.
pub fn parse(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() || raw == UNKNOWN {
        return None;
    }

    for format in FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            debug!(input = raw, %format, %date, "parsed date");
            return Some(date);
        }
    }

    None
}

/// Parse a canonical `YYYY-MM-DD` date, strictly.
pub fn parse_iso(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), ISO_FORMAT).ok()
}

/// Check that `from` does not come after `to`.
///
/// Both bounds must be canonical `YYYY-MM-DD`; anything else fails the
/// check rather than passing it.
pub fn validate_range(from: &str, to: &str) -> bool {
    match (parse_iso(from), parse_iso(to)) {
        (Some(from), Some(to)) => from <= to,
        _ => false,
    }
}

/// Render a canonical `YYYY-MM-DD` string as `DD-MM-YYYY` for display.
///
/// Non-canonical input comes back unchanged so the caller can still show
/// whatever it has.
pub fn format_for_display(date_str: &str) -> String {
    match parse_iso(date_str) {
        Some(date) => date.format(DISPLAY_FORMAT).to_string(),
        None => date_str.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_every_accepted_format() {
        let cases = [
            ("17-Jun-24", date(2024, 6, 17)),
            ("17-Jun-2024", date(2024, 6, 17)),
            ("17-06-2024", date(2024, 6, 17)),
            ("17.06.2024", date(2024, 6, 17)),
            ("17/06/2024", date(2024, 6, 17)),
            ("2024-06-17", date(2024, 6, 17)),
            ("06/17/2024", date(2024, 6, 17)),
            ("June 17, 2024", date(2024, 6, 17)),
            ("Jun 17, 2024", date(2024, 6, 17)),
            ("17 June 2024", date(2024, 6, 17)),
            ("17 Jun 2024", date(2024, 6, 17)),
        ];

        for (input, expected) in cases {
            assert_eq!(parse(input), Some(expected), "failed for {input}");
        }
    }

    #[test]
    fn day_month_order_wins_when_ambiguous() {
        // 03/04/2024 could be March 4 or April 3. Day-first is tried first.
        assert_eq!(parse("03/04/2024"), Some(date(2024, 4, 3)));
        // Day-first cannot apply, so the US fallback kicks in.
        assert_eq!(parse("06/17/2024"), Some(date(2024, 6, 17)));
    }

    #[test]
    fn two_digit_years_resolve_to_the_right_century() {
        assert_eq!(parse("17-Jun-24"), Some(date(2024, 6, 17)));
        assert_eq!(parse("17-Jun-99"), Some(date(1999, 6, 17)));
    }

    #[test]
    fn rejects_empty_sentinel_and_garbage() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("   "), None);
        assert_eq!(parse("Unknown"), None);
        assert_eq!(parse("invalid"), None);
        assert_eq!(parse("32-13-2024"), None);
    }

    #[test]
    fn trims_whitespace_before_parsing() {
        assert_eq!(parse("  17-Jun-24  "), Some(date(2024, 6, 17)));
    }

    #[test]
    fn iso_parse_is_strict() {
        assert_eq!(parse_iso("2024-06-17"), Some(date(2024, 6, 17)));
        assert_eq!(parse_iso("17-06-2024"), None);
        assert_eq!(parse_iso("17-Jun-24"), None);
    }

    #[test]
    fn range_validation() {
        assert!(validate_range("2024-01-01", "2024-12-31"));
        assert!(validate_range("2024-06-15", "2024-06-15"));
        assert!(!validate_range("2024-12-31", "2024-01-01"));
        // Malformed bounds fail the check rather than passing it.
        assert!(!validate_range("01-01-2024", "2024-12-31"));
        assert!(!validate_range("2024-01-01", "soon"));
    }

    #[test]
    fn display_formatting() {
        assert_eq!(format_for_display("2024-06-17"), "17-06-2024");
        assert_eq!(format_for_display("not-a-date"), "not-a-date");
    }
}
