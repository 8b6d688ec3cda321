//! Calendar date helpers for user-supplied input.

use chrono::NaiveDate;

use crate::error::{CoreError, CoreResult};

const ISO_FORMAT: &str = "%Y-%m-%d";
const US_FORMAT: &str = "%m-%d-%Y";

/// Normalize a date string to `YYYY-MM-DD`.
///
/// `MM-DD-YYYY` input is rewritten; anything else, ISO included, is returned
/// trimmed but otherwise untouched.
#[must_use]
pub fn normalize_date(input: &str) -> String {
    let input = input.trim();
    match NaiveDate::parse_from_str(input, US_FORMAT) {
        Ok(date) => date.format(ISO_FORMAT).to_string(),
        Err(_) => input.to_string(),
    }
}

/// Parse a date in either accepted format.
///
/// # Errors
/// `CoreError::ValidationError` naming the rejected input
pub fn parse_date(input: &str) -> CoreResult<NaiveDate> {
    let normalized = normalize_date(input);
    NaiveDate::parse_from_str(&normalized, ISO_FORMAT)
        .map_err(|_| CoreError::ValidationError(format!("Invalid date: '{}'", input.trim())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn us_dates_are_rewritten_to_iso() {
        assert_eq!(normalize_date("03-15-2024"), "2024-03-15");
        assert_eq!(normalize_date(" 12-01-2023 "), "2023-12-01");
    }

    #[test]
    fn iso_and_unknown_formats_pass_through() {
        assert_eq!(normalize_date("2024-03-15"), "2024-03-15");
        assert_eq!(normalize_date("15/03/2024"), "15/03/2024");
        assert_eq!(normalize_date("soon"), "soon");
    }

    #[test]
    fn parse_accepts_both_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(parse_date("2024-03-15").unwrap(), expected);
        assert_eq!(parse_date("03-15-2024").unwrap(), expected);
    }

    #[test]
    fn parse_rejects_unknown_format() {
        let err = parse_date("15/03/2024").unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(msg) if msg.contains("15/03/2024")));
    }
}
