//! Page sources that need no image model: plain text and PDF pages.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::PageRecognizer;
use crate::error::{OcrError, RcptError};
use crate::pdf::PdfPages;

/// One captured receipt page.
#[derive(Clone)]
pub enum CapturedPage {
    /// Text already recognized elsewhere (e.g. by the device camera OCR).
    Text(String),
    /// A page of a digital receipt PDF (1-indexed).
    Pdf { document: Arc<PdfPages>, page: u32 },
}

impl CapturedPage {
    /// Load the pages contained in a file.
    ///
    /// `.txt` files are one page; `.pdf` files yield one page per PDF page.
    pub fn load(path: &Path) -> crate::Result<Vec<CapturedPage>> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "txt" | "text" => {
                let text = fs::read_to_string(path)?;
                Ok(vec![CapturedPage::Text(text)])
            }
            "pdf" => {
                let data = fs::read(path)?;
                let document = Arc::new(PdfPages::load(&data)?);
                debug!("{} contributes {} pages", path.display(), document.page_count());

                Ok((1..=document.page_count())
                    .map(|page| CapturedPage::Pdf {
                        document: Arc::clone(&document),
                        page,
                    })
                    .collect())
            }
            _ => Err(RcptError::UnsupportedInput(format!(
                "{} (expected .txt or .pdf)",
                path.display()
            ))),
        }
    }
}

/// Recognizer for [`CapturedPage`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentRecognizer;

#[async_trait]
impl PageRecognizer for DocumentRecognizer {
    type Page = CapturedPage;

    async fn recognize(&self, captured: &CapturedPage) -> Result<String, OcrError> {
        match captured {
            CapturedPage::Text(text) => Ok(text.clone()),
            CapturedPage::Pdf { document, page } => Ok(document.page_text(*page)?),
        }
    }
}
