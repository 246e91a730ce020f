//! Rule-based field extractors for receipts.

pub mod amounts;
pub mod dates;
pub mod labels;
pub mod patterns;

pub use amounts::{TotalExtractor, to_decimal};
pub use dates::{DateExtractor, parse_receipt_date, DATE_FORMATS};
pub use labels::{resolve_category, resolve_payment_method, CATEGORY_RULES, PAYMENT_METHOD_RULES};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;
}

/// An extracted value together with the text it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Position in source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}
