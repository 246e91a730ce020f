//! Generative (language model) receipt extraction.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::ExtractionError;
use crate::models::receipt::CandidateRecord;

use super::{ReceiptExtractor, Result};

/// Prompt sent to the model. `{text}` is replaced with the receipt text.
pub const PROMPT_TEMPLATE: &str = r#"You are a receipt data extraction assistant.
Identify the store name, date, total, and purchased items in the receipt text below.
Return ONLY a JSON object with these keys, using null for anything you cannot find:
{
  "store_name": string,
  "store_address": string,
  "store_phone": string,
  "date": string (as printed on the receipt),
  "transaction_number": string,
  "subtotal": number,
  "tax": number,
  "tips": number,
  "total": number,
  "currency": string (ISO code, e.g. "USD"),
  "payment_method": string (e.g. "cash", "credit card", "debit card", "apple pay", "gift card"),
  "card_last_four": string,
  "category": string (one of groceries, restaurant, gas, shopping, entertainment, travel, healthcare, utilities, other),
  "items": [{"name": string, "quantity": integer, "price": number}]
}

Receipt text:
{text}"#;

/// Embed receipt text into [`PROMPT_TEMPLATE`].
pub fn build_prompt(text: &str) -> String {
    PROMPT_TEMPLATE.replace("{text}", text)
}

/// A generative model that turns a prompt into a candidate record.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Whether the model can be used at all on this device.
    async fn is_available(&self) -> bool;

    /// Run the model on a prompt.
    async fn generate(&self, prompt: &str) -> Result<CandidateRecord>;
}

/// Stand-in for devices without a generative model.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoModel;

#[async_trait]
impl GenerativeModel for NoModel {
    async fn is_available(&self) -> bool {
        false
    }

    async fn generate(&self, _prompt: &str) -> Result<CandidateRecord> {
        Err(ExtractionError::Generative(
            "no generative model is available".to_string(),
        ))
    }
}

/// Extractor that delegates to a [`GenerativeModel`].
///
/// Any model failure surfaces as [`ExtractionError::Generative`].
pub struct GenerativeExtractor<M> {
    model: M,
}

impl<M: GenerativeModel> GenerativeExtractor<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    /// Access the underlying model.
    pub fn model(&self) -> &M {
        &self.model
    }

    pub async fn is_available(&self) -> bool {
        self.model.is_available().await
    }
}

#[async_trait]
impl<M: GenerativeModel> ReceiptExtractor for GenerativeExtractor<M> {
    async fn extract(&self, text: &str) -> Result<CandidateRecord> {
        let prompt = build_prompt(text);
        debug!("Sending {} character prompt to generative model", prompt.len());

        self.model.generate(&prompt).await.map_err(|e| {
            warn!("Generative extraction failed: {}", e);
            match e {
                ExtractionError::Generative(msg) => ExtractionError::Generative(msg),
                other => ExtractionError::Generative(other.to_string()),
            }
        })
    }
}

/// Parse a model reply into a candidate record.
///
/// Tolerates markdown code fences and text around the JSON object.
pub fn parse_candidate_json(reply: &str) -> Result<CandidateRecord> {
    let trimmed = reply.trim();
    let start = trimmed.find('{');
    let end = trimmed.rfind('}');

    let json = match (start, end) {
        (Some(s), Some(e)) if s < e => &trimmed[s..=e],
        _ => {
            return Err(ExtractionError::MalformedOutput(
                "reply contains no JSON object".to_string(),
            ));
        }
    };

    serde_json::from_str(json).map_err(|e| ExtractionError::MalformedOutput(e.to_string()))
}
