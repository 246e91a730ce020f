//! Generative model backed by an OpenAI-compatible chat endpoint (Ollama,
//! llama.cpp server, LM Studio, ...).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use rcpt_core::error::ExtractionError;
use rcpt_core::models::config::LlmConfig;
use rcpt_core::receipt::{parse_candidate_json, GenerativeModel};
use rcpt_core::CandidateRecord;

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Local language model reached over HTTP.
pub struct OpenAiCompatibleModel {
    client: Client,
    base_url: String,
    model: String,
    temperature: f64,
}

impl OpenAiCompatibleModel {
    pub fn new(config: &LlmConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    /// The whole prompt goes out as a single user message.
    fn chat_request(&self, prompt: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: self.temperature,
        }
    }
}

#[async_trait]
impl GenerativeModel for OpenAiCompatibleModel {
    async fn is_available(&self) -> bool {
        let url = format!("{}/models", self.base_url);

        match self
            .client
            .get(&url)
            .timeout(Duration::from_secs(3))
            .send()
            .await
        {
            Ok(resp) if resp.status().is_success() => {
                info!("Model server reachable at {}", self.base_url);
                true
            }
            Ok(resp) => {
                warn!("Model server returned {}, using fallback extraction", resp.status());
                false
            }
            Err(e) => {
                warn!("Model server not reachable ({}), using fallback extraction", e);
                false
            }
        }
    }

    async fn generate(&self, prompt: &str) -> Result<CandidateRecord, ExtractionError> {
        let request = self.chat_request(prompt);

        let url = format!("{}/chat/completions", self.base_url);
        debug!("POST {} with model {} ({} prompt characters)", url, self.model, prompt.len());

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ExtractionError::Generative(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractionError::Generative(format!(
                "model API error {}: {}",
                status, body
            )));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| ExtractionError::MalformedOutput(e.to_string()))?;

        let content = chat
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| ExtractionError::MalformedOutput("empty response".to_string()))?;

        parse_candidate_json(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rcpt_core::receipt::build_prompt;

    #[test]
    fn test_long_receipt_is_sent_whole() {
        let mut text = String::new();
        for i in 0..1_100 {
            text.push_str(&format!("ITEM {:04} WIDGET 1.00\n", i));
        }
        text.push_str("\n--- Page 3 ---\n\nTOTAL: $99.99");
        let prompt = build_prompt(&text);

        let model = OpenAiCompatibleModel::new(&LlmConfig::default()).unwrap();
        let request = model.chat_request(&prompt);

        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].content, prompt);
        assert!(request.messages[0].content.contains("TOTAL: $99.99"));
        assert!(request.messages[0].content.contains("ITEM 0000 WIDGET"));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_unavailable() {
        let config = LlmConfig {
            base_url: "http://127.0.0.1:9/v1".to_string(),
            timeout_secs: 2,
            ..Default::default()
        };
        let model = OpenAiCompatibleModel::new(&config).unwrap();
        assert!(!model.is_available().await);
    }
}
