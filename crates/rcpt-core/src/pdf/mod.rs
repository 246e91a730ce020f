//! PDF page text extraction for digital receipts.

mod extractor;

pub use extractor::PdfPages;

#[cfg(test)]
pub(crate) use extractor::tests::create_test_pdf;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;
