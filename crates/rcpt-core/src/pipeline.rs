//! End-to-end receipt processing: pages -> text -> candidate -> receipt.

use std::time::Instant;

use tracing::{debug, info};

use crate::error::RcptError;
use crate::models::receipt::{CandidateRecord, Receipt};
use crate::ocr::{aggregate_pages, recognize_pages, PageRecognizer};
use crate::receipt::{
    normalize, ExtractionStrategy, FallbackExtractor, GenerativeExtractor, GenerativeModel,
    ReceiptExtractor,
};
use crate::storage::{ReceiptStore, StoredReceipt};
use crate::Result;

/// Output of one pipeline run.
#[derive(Debug, Clone)]
pub struct ProcessedReceipt {
    /// Normalized receipt.
    pub receipt: Receipt,
    /// Aggregated page text the receipt was extracted from.
    pub raw_text: String,
    /// Extractor that produced the candidate record.
    pub strategy: ExtractionStrategy,
    /// Number of captured pages.
    pub page_count: usize,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Runs one receipt through recognition, extraction and normalization.
///
/// Each call is independent. Pages are recognized one after another in
/// capture order, and the extractor is chosen once per call from model
/// availability. A failing model is reported, never retried and never
/// replaced by the fallback. Dropping the returned future abandons the run
/// without side effects; stores are only written after everything succeeded.
pub struct ReceiptPipeline<R, M, F = FallbackExtractor> {
    recognizer: R,
    generative: GenerativeExtractor<M>,
    fallback: F,
    max_pages: usize,
}

impl<R: PageRecognizer, M: GenerativeModel> ReceiptPipeline<R, M> {
    /// Create a pipeline with the pattern-based fallback.
    pub fn new(recognizer: R, model: M) -> Self {
        Self {
            recognizer,
            generative: GenerativeExtractor::new(model),
            fallback: FallbackExtractor::new(),
            max_pages: 0,
        }
    }
}

impl<R, M, F> ReceiptPipeline<R, M, F>
where
    R: PageRecognizer,
    M: GenerativeModel,
    F: ReceiptExtractor,
{
    /// Replace the fallback extractor.
    pub fn with_fallback<G: ReceiptExtractor>(self, fallback: G) -> ReceiptPipeline<R, M, G> {
        ReceiptPipeline {
            recognizer: self.recognizer,
            generative: self.generative,
            fallback,
            max_pages: self.max_pages,
        }
    }

    /// Limit the number of pages per receipt (0 = unlimited).
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Process the captured pages of one receipt.
    pub async fn process(&self, pages: &[R::Page]) -> Result<ProcessedReceipt> {
        let start = Instant::now();

        if pages.is_empty() {
            return Err(RcptError::NoText);
        }
        if self.max_pages > 0 && pages.len() > self.max_pages {
            return Err(RcptError::UnsupportedInput(format!(
                "{} pages given, at most {} allowed",
                pages.len(),
                self.max_pages
            )));
        }

        info!("Processing receipt with {} pages", pages.len());

        let texts = recognize_pages(&self.recognizer, pages).await?;
        let raw_text = aggregate_pages(&texts);

        if raw_text.trim().is_empty() {
            return Err(RcptError::NoText);
        }

        let (candidate, strategy) = self.extract(&raw_text).await?;
        let receipt = normalize(candidate);

        let processing_time_ms = start.elapsed().as_millis() as u64;
        info!(
            "Extracted receipt from {:?} via {:?} in {}ms",
            receipt.store_name, strategy, processing_time_ms
        );

        Ok(ProcessedReceipt {
            receipt,
            raw_text,
            strategy,
            page_count: pages.len(),
            processing_time_ms,
        })
    }

    /// Process the pages and persist the result.
    ///
    /// Nothing is written unless processing succeeds.
    pub async fn process_and_store<S: ReceiptStore + ?Sized>(
        &self,
        pages: &[R::Page],
        image_refs: Vec<String>,
        store: &S,
    ) -> Result<(ProcessedReceipt, StoredReceipt)> {
        let processed = self.process(pages).await?;
        let stored = store.save(
            processed.receipt.clone(),
            image_refs,
            processed.raw_text.clone(),
        )?;
        debug!("Stored receipt {}", stored.id);
        Ok((processed, stored))
    }

    /// Choose the strategy for this run and extract a candidate record.
    async fn extract(&self, text: &str) -> Result<(CandidateRecord, ExtractionStrategy)> {
        let strategy = ExtractionStrategy::select(self.generative.is_available().await);
        debug!("Using {:?} extraction on {} characters", strategy, text.len());

        let candidate = match strategy {
            ExtractionStrategy::Generative => self.generative.extract(text).await?,
            ExtractionStrategy::Fallback => self.fallback.extract(text).await?,
        };

        Ok((candidate, strategy))
    }
}
