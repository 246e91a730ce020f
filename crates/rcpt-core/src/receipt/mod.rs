//! Receipt field extraction module.

mod fallback;
mod generative;
mod normalize;
pub mod rules;

pub use fallback::{FallbackExtractor, FALLBACK_CURRENCY};
pub use generative::{
    build_prompt, parse_candidate_json, GenerativeExtractor, GenerativeModel, NoModel,
    PROMPT_TEMPLATE,
};
pub use normalize::normalize;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;
use crate::models::receipt::CandidateRecord;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Trait for receipt extractors. Both strategies share this output type.
#[async_trait]
pub trait ReceiptExtractor: Send + Sync {
    /// Extract a candidate record from aggregated receipt text.
    async fn extract(&self, text: &str) -> Result<CandidateRecord>;
}

/// Which extractor handled a receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStrategy {
    /// Language model extraction.
    Generative,
    /// Pattern-based extraction.
    Fallback,
}

impl ExtractionStrategy {
    /// Pick the strategy for one run from model availability.
    pub fn select(generative_available: bool) -> Self {
        if generative_available {
            ExtractionStrategy::Generative
        } else {
            ExtractionStrategy::Fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_strategy() {
        assert_eq!(ExtractionStrategy::select(true), ExtractionStrategy::Generative);
        assert_eq!(ExtractionStrategy::select(false), ExtractionStrategy::Fallback);
    }
}
