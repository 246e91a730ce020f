//! Date extraction and parsing for receipts.

use chrono::NaiveDate;

use super::patterns::{DATE_ISO, DATE_MONTH_NAME, DATE_SLASH};
use super::{ExtractionMatch, FieldExtractor};

/// Formats tried, in order, when turning a receipt date string into a date.
///
/// Month-first wins over day-first for ambiguous slash dates.
///
/// Years are read literally: a two-digit year such as `3/15/24` parses
/// under `%m/%d/%Y` as year 24, not 2024.
pub const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%m-%d-%Y",
];

/// Finds the first date-looking substring, keeping it as free text.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let m = [&*DATE_SLASH, &*DATE_ISO, &*DATE_MONTH_NAME]
            .into_iter()
            .find_map(|pattern| pattern.find(text))?;

        Some(ExtractionMatch::new(m.as_str().to_string(), m.as_str()).with_position(m.start(), m.end()))
    }
}

/// Parse a receipt date string using [`DATE_FORMATS`]; first success wins.
pub fn parse_receipt_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_extract_slash_date() {
        let result = DateExtractor::new().extract("Date: 03/15/2024 14:02").unwrap();
        assert_eq!(result.value, "03/15/2024");
        assert_eq!(result.position, Some((6, 16)));
    }

    #[test]
    fn test_slash_beats_iso() {
        let text = "Printed 2024-03-16\nSold 3/15/24";
        let result = DateExtractor::new().extract(text).unwrap();
        assert_eq!(result.value, "3/15/24");
    }

    #[test]
    fn test_extract_iso_date() {
        let result = DateExtractor::new().extract("2024-03-15 12:00").unwrap();
        assert_eq!(result.value, "2024-03-15");
    }

    #[test]
    fn test_extract_month_name_date() {
        let result = DateExtractor::new().extract("Visit on Jan 5, 2024 again").unwrap();
        assert_eq!(result.value, "Jan 5, 2024");

        let result = DateExtractor::new().extract("JANUARY 5 2024").unwrap();
        assert_eq!(result.value, "JANUARY 5 2024");
    }

    #[test]
    fn test_month_name_requires_real_month() {
        assert!(DateExtractor::new().extract("Market 12 2024").is_none());
        assert!(DateExtractor::new().extract("Marble Ave 4 2024").is_none());

        let result = DateExtractor::new().extract("Sold Sept. 5, 2024").unwrap();
        assert_eq!(result.value, "Sept. 5, 2024");
    }

    #[test]
    fn test_no_date() {
        assert!(DateExtractor::new().extract("no dates here").is_none());
    }

    #[test]
    fn test_parse_iso() {
        assert_eq!(parse_receipt_date("2024-03-15"), Some(ymd(2024, 3, 15)));
    }

    #[test]
    fn test_parse_two_digit_year_literally() {
        assert_eq!(parse_receipt_date("3/15/24"), Some(ymd(24, 3, 15)));
    }

    #[test]
    fn test_parse_us_before_day_first() {
        assert_eq!(parse_receipt_date("03/04/2024"), Some(ymd(2024, 3, 4)));
        assert_eq!(parse_receipt_date("15/03/2024"), Some(ymd(2024, 3, 15)));
    }

    #[test]
    fn test_parse_month_names() {
        assert_eq!(parse_receipt_date("Mar 15, 2024"), Some(ymd(2024, 3, 15)));
        assert_eq!(parse_receipt_date("March 15, 2024"), Some(ymd(2024, 3, 15)));
    }

    #[test]
    fn test_parse_dash_numeric() {
        assert_eq!(parse_receipt_date("03-15-2024"), Some(ymd(2024, 3, 15)));
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(parse_receipt_date("not a date"), None);
        assert_eq!(parse_receipt_date(""), None);
        assert_eq!(parse_receipt_date("13/13/2024"), None);
    }
}
