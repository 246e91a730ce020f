//! Error types for the rcpt-core library.

use thiserror::Error;

/// Main error type for the rcpt library.
#[derive(Error, Debug)]
pub enum RcptError {
    /// No page produced any text, so there is nothing to extract from.
    #[error("no text could be extracted from the captured pages")]
    NoText,

    /// Recognition failed for one captured page (1-based).
    #[error("OCR error on page {page}: {source}")]
    Ocr {
        page: usize,
        #[source]
        source: OcrError,
    },

    /// The input cannot be used as a receipt page.
    #[error("unsupported input: {0}")]
    UnsupportedInput(String),

    /// Receipt extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Receipt storage error.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text from page {page}: {reason}")]
    TextExtraction { page: u32, reason: String },

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors related to page recognition.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Recognition of a captured page failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// The page text could not be read from its PDF.
    #[error(transparent)]
    Pdf(#[from] PdfError),
}

/// Errors related to receipt field extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The generative model failed; the fallback is deliberately not used.
    #[error("parsing failed: {0}")]
    Generative(String),

    /// The model answered with something that is not a candidate record.
    #[error("malformed model output: {0}")]
    MalformedOutput(String),
}

/// Errors related to the receipt store.
#[derive(Error, Debug)]
pub enum StorageError {
    /// No receipt with the given id.
    #[error("receipt not found: {0}")]
    NotFound(String),

    /// Stored receipt could not be (de)serialized.
    #[error("failed to serialize receipt: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error while reading or writing the store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the rcpt library.
pub type Result<T> = std::result::Result<T, RcptError>;
