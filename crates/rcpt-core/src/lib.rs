//! Core library for receipt text parsing.
//!
//! This crate provides:
//! - Page recognition and multi-page text aggregation
//! - Generative and pattern-based receipt extraction
//! - Normalization into typed receipts (dates, decimal amounts, enums)
//! - A receipt store abstraction with JSON and in-memory stores

pub mod error;
pub mod models;
pub mod ocr;
pub mod pdf;
pub mod pipeline;
pub mod receipt;
pub mod storage;

pub use error::{RcptError, Result};
pub use models::config::RcptConfig;
pub use models::receipt::{CandidateLineItem, CandidateRecord, Category, LineItem, PaymentMethod, Receipt};
pub use ocr::{aggregate_pages, CapturedPage, DocumentRecognizer, PageRecognizer};
pub use pipeline::{ProcessedReceipt, ReceiptPipeline};
pub use receipt::{
    normalize, ExtractionStrategy, FallbackExtractor, GenerativeExtractor, GenerativeModel,
    NoModel, ReceiptExtractor,
};
pub use storage::{JsonReceiptStore, MemoryReceiptStore, ReceiptStore, StoredReceipt};
