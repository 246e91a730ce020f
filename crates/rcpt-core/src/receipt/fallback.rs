//! Deterministic, pattern-based receipt extractor.

use async_trait::async_trait;
use tracing::debug;

use crate::models::receipt::CandidateRecord;

use super::rules::{DateExtractor, FieldExtractor, TotalExtractor};
use super::{ReceiptExtractor, Result};

/// Currency assumed by the fallback path.
pub const FALLBACK_CURRENCY: &str = "USD";

/// Extracts store name, total and date without any learned model.
///
/// Never fails: anything it cannot find is left absent. Items, address, phone,
/// transaction number, subtotal, tax, tips, payment method and category are
/// never attempted.
pub struct FallbackExtractor {
    totals: TotalExtractor,
    dates: DateExtractor,
}

impl FallbackExtractor {
    pub fn new() -> Self {
        Self {
            totals: TotalExtractor::new(),
            dates: DateExtractor::new(),
        }
    }

    /// Extract a candidate record from aggregated receipt text.
    pub fn extract_candidate(&self, text: &str) -> CandidateRecord {
        let store_name = extract_store_name(text);
        let total = self.totals.extract(text).map(|m| m.value);
        let date = self.dates.extract(text).map(|m| m.value);

        debug!(
            "Fallback extraction: store={:?}, total={:?}, date={:?}",
            store_name, total, date
        );

        CandidateRecord {
            store_name,
            date,
            total,
            currency: Some(FALLBACK_CURRENCY.to_string()),
            ..Default::default()
        }
    }
}

impl Default for FallbackExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReceiptExtractor for FallbackExtractor {
    async fn extract(&self, text: &str) -> Result<CandidateRecord> {
        Ok(self.extract_candidate(text))
    }
}

/// First line that is non-empty after trimming.
fn extract_store_name(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_store_name_skips_blank_lines() {
        let candidate = FallbackExtractor::new().extract_candidate("\n\n  Joe's Diner\n123 Main St");
        assert_eq!(candidate.store_name.as_deref(), Some("Joe's Diner"));
    }

    #[test]
    fn test_total_priority() {
        let extractor = FallbackExtractor::new();

        let candidate = extractor.extract_candidate("Shop\nAmount: $5.00\nTotal: $12.34");
        assert_eq!(candidate.total, Some(12.34));

        let candidate = extractor.extract_candidate("Shop\nAmount: $5.00");
        assert_eq!(candidate.total, Some(5.0));
    }

    #[test]
    fn test_full_receipt() {
        let text = r#"
            FRESH MART
            42 Elm Street
            03/15/2024 10:31
            Bananas        1.20
            Bread          2.80
            TOTAL: $4.00
            VISA CREDIT
        "#;

        let candidate = FallbackExtractor::new().extract_candidate(text);

        assert_eq!(
            candidate,
            CandidateRecord {
                store_name: Some("FRESH MART".to_string()),
                date: Some("03/15/2024".to_string()),
                total: Some(4.0),
                currency: Some("USD".to_string()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_empty_text() {
        let candidate = FallbackExtractor::new().extract_candidate("   \n\t\n");
        assert_eq!(candidate.store_name, None);
        assert_eq!(candidate.total, None);
        assert_eq!(candidate.date, None);
        assert_eq!(candidate.currency.as_deref(), Some("USD"));
        assert!(candidate.items.is_empty());
    }

    #[tokio::test]
    async fn test_trait_never_fails() {
        let extractor = FallbackExtractor::new();
        let candidate = extractor.extract("").await.unwrap();
        assert_eq!(candidate.store_name, None);
    }
}
