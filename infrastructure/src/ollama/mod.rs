//! Ollama HTTP adapter
//!
//! Implements the [`LlmGateway`](triage_application::LlmGateway) port on top
//! of Ollama's non-streaming `/api/generate` endpoint.

pub mod gateway;
mod protocol;

pub use gateway::{OllamaConfig, OllamaLlmGateway};
