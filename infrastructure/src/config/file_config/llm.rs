//! LLM backend configuration from TOML (`[llm]` section)

use serde::{Deserialize, Serialize};

/// Default Ollama endpoint
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:11434";
/// Default model name
pub const DEFAULT_MODEL: &str = "llama3";
/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f64 = 0.5;
/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 120;

/// Raw LLM configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLlmConfig {
    /// Base URL of the Ollama server
    pub base_url: String,
    /// Model to generate with
    pub model: String,
    /// Sampling temperature, `0.0..=2.0`
    pub temperature: f64,
    /// Per-request timeout
    pub timeout_seconds: u64,
}

impl Default for FileLlmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}
