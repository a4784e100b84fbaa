//! Ollama `/api/generate` wire types

use serde::{Deserialize, Serialize};

/// Request body for a non-streaming generation
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub stream: bool,
    pub options: GenerateOptions,
}

/// Sampling options
#[derive(Debug, Clone, Serialize)]
pub struct GenerateOptions {
    pub temperature: f64,
}

/// Response body of a non-streaming generation
///
/// Ollama sends more fields (timings, context); only the text is kept.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    pub response: String,
}

/// Error body returned with non-2xx statuses
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let request = GenerateRequest {
            model: "llama3",
            prompt: "hi",
            stream: false,
            options: GenerateOptions { temperature: 0.5 },
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "model": "llama3",
                "prompt": "hi",
                "stream": false,
                "options": {"temperature": 0.5}
            })
        );
    }

    #[test]
    fn test_response_ignores_extra_fields() {
        let body = r#"{"model":"llama3","response":"Paris.","done":true,"eval_count":3}"#;
        let parsed: GenerateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.response, "Paris.");
    }
}
