//! Configuration structures for the receipt pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the rcpt pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RcptConfig {
    /// Local language model configuration.
    pub llm: LlmConfig,

    /// Page intake configuration.
    pub pages: PageConfig,

    /// Receipt storage configuration.
    pub storage: StorageConfig,
}

/// Generative model endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Use the generative extractor when the model is reachable.
    pub enabled: bool,

    /// Base URL of an OpenAI-compatible API.
    pub base_url: String,

    /// Model name sent with each request.
    pub model: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Sampling temperature.
    pub temperature: f64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "http://localhost:11434/v1".to_string(),
            model: "llama3.2".to_string(),
            timeout_secs: 60,
            temperature: 0.0,
        }
    }
}

/// Page intake configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Maximum pages per receipt (0 = unlimited).
    pub max_pages: usize,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self { max_pages: 20 }
    }
}

/// Receipt storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding one JSON file per stored receipt.
    pub receipts_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            receipts_dir: PathBuf::from("receipts"),
        }
    }
}

impl RcptConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}
