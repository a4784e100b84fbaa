//! Ollama LLM Gateway implementation

use super::protocol::{ErrorResponse, GenerateOptions, GenerateRequest, GenerateResponse};
use crate::config::FileLlmConfig;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};
use triage_application::ports::llm_gateway::{GatewayError, LlmGateway};

/// Connection settings for an Ollama server
#[derive(Debug, Clone, PartialEq)]
pub struct OllamaConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f64,
    pub timeout: Duration,
}

impl From<&FileLlmConfig> for OllamaConfig {
    fn from(config: &FileLlmConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            timeout: Duration::from_secs(config.timeout_seconds),
        }
    }
}

/// LLM Gateway implementation for a local or remote Ollama server
pub struct OllamaLlmGateway {
    client: reqwest::Client,
    config: OllamaConfig,
}

impl OllamaLlmGateway {
    /// Build the HTTP client. No request is made until the first `generate`.
    pub fn new(config: OllamaConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::Other(format!("Failed to build HTTP client: {}", e)))?;

        info!(
            "OllamaLlmGateway initialized ({} at {})",
            config.model, config.base_url
        );

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &OllamaConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!("{}/api/generate", self.config.base_url.trim_end_matches('/'))
    }
}

fn map_send_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else if e.is_connect() {
        GatewayError::ConnectionError(e.to_string())
    } else {
        GatewayError::RequestFailed(e.to_string())
    }
}

#[async_trait]
impl LlmGateway for OllamaLlmGateway {
    async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
        let request = GenerateRequest {
            model: &self.config.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: self.config.temperature,
            },
        };

        let url = self.endpoint();
        debug!("POST {} ({} prompt bytes)", url, prompt.len());

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                GatewayError::Timeout
            } else {
                GatewayError::InvalidResponse(e.to_string())
            }
        })?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(err) => format!("HTTP {}: {}", status.as_u16(), err.error),
                Err(_) => format!("HTTP {}", status.as_u16()),
            };
            return Err(GatewayError::RequestFailed(message));
        }

        let parsed: GenerateResponse = serde_json::from_str(&body)
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        debug!("Ollama returned {} bytes", parsed.response.len());
        Ok(parsed.response)
    }

    fn describe(&self) -> String {
        format!("ollama:{}", self.config.model)
    }
}
