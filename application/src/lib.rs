//! Application layer for triage
//!
//! This crate contains the answer use case and the port definitions it
//! depends on. It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{GatewayError, LlmGateway},
    progress::{AnswerProgressNotifier, NoAnswerProgress},
};
pub use use_cases::answer_question::{Answer, AnswerQuestionUseCase, LLM_ERROR_PREFIX};
