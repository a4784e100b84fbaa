//! Prompt domain
//!
//! Templates for the prompts sent to the LLM backend.

mod template;

pub use template::PromptTemplate;
