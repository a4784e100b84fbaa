//! Infrastructure layer for triage
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod ollama;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileLlmConfig, FileLoggingConfig,
    FileOutputConfig, FileReplConfig,
};
pub use logging::JsonlConversationLogger;
pub use ollama::{OllamaConfig, OllamaLlmGateway};
