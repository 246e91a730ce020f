//! Page recognition: turning captured pages into text, one page at a time.

mod aggregate;
mod source;

pub use aggregate::{aggregate_pages, page_marker};
pub use source::{CapturedPage, DocumentRecognizer};

use async_trait::async_trait;
use tracing::debug;

use crate::error::{OcrError, RcptError};

/// Recognizes the text of one captured page.
#[async_trait]
pub trait PageRecognizer: Send + Sync {
    /// The kind of page this recognizer reads (an image, a PDF page, ...).
    type Page: Send + Sync;

    /// Recognize one page. An empty string means the page had no text.
    async fn recognize(&self, page: &Self::Page) -> Result<String, OcrError>;
}

/// Recognize pages strictly in capture order, awaiting each before the next.
///
/// The first failing page aborts the run with its 1-based position.
pub async fn recognize_pages<R: PageRecognizer>(
    recognizer: &R,
    pages: &[R::Page],
) -> crate::Result<Vec<String>> {
    let mut texts = Vec::with_capacity(pages.len());

    for (i, page) in pages.iter().enumerate() {
        let text = recognizer
            .recognize(page)
            .await
            .map_err(|source| RcptError::Ocr { page: i + 1, source })?;

        debug!("Page {}/{}: {} characters", i + 1, pages.len(), text.len());
        texts.push(text);
    }

    Ok(texts)
}
