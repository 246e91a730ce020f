//! Per-page text extraction using lopdf.

use lopdf::Document;
use tracing::debug;

use super::Result;
use crate::error::PdfError;

/// A loaded PDF whose pages are treated as captured receipt pages.
pub struct PdfPages {
    document: Document,
}

impl PdfPages {
    /// Load a PDF from bytes.
    pub fn load(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        if document.is_encrypted() {
            return Err(PdfError::Encrypted);
        }

        let page_count = document.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        Ok(Self { document })
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.document.get_pages().len() as u32
    }

    /// Extract the embedded text of one page (1-indexed).
    pub fn page_text(&self, page: u32) -> Result<String> {
        if page == 0 || page > self.page_count() {
            return Err(PdfError::TextExtraction {
                page,
                reason: format!("document has {} pages", self.page_count()),
            });
        }

        self.document
            .extract_text(&[page])
            .map_err(|e| PdfError::TextExtraction {
                page,
                reason: e.to_string(),
            })
    }
}
