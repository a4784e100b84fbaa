//! LLM Gateway port
//!
//! Defines the interface for communicating with a text-generation backend.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl GatewayError {
    /// Whether the backend could not be reached at all
    pub fn is_unreachable(&self) -> bool {
        matches!(self, GatewayError::ConnectionError(_) | GatewayError::Timeout)
    }
}

/// Gateway for LLM communication
///
/// One prompt in, one completion out. Implementations (adapters) live in
/// the infrastructure layer and own model choice, temperature and timeouts.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Generate a completion for `prompt`
    async fn generate(&self, prompt: &str) -> Result<String, GatewayError>;

    /// Human-readable backend description (e.g. `ollama:llama3`), for logs and banners
    fn describe(&self) -> String {
        "llm".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(GatewayError::Timeout.to_string(), "Timeout");
        assert_eq!(
            GatewayError::ConnectionError("refused".to_string()).to_string(),
            "Connection error: refused"
        );
        assert_eq!(
            GatewayError::RequestFailed("HTTP 500: boom".to_string()).to_string(),
            "Request failed: HTTP 500: boom"
        );
    }

    #[test]
    fn test_is_unreachable() {
        assert!(GatewayError::Timeout.is_unreachable());
        assert!(GatewayError::ConnectionError("x".to_string()).is_unreachable());
        assert!(!GatewayError::InvalidResponse("x".to_string()).is_unreachable());
    }
}
