//! Prompt templates for LLM-answered questions

use crate::classification::Classification;

/// Templates for generating prompts
pub struct PromptTemplate;

impl PromptTemplate {
    /// Prompt for an opinion or factual question.
    ///
    /// The question is embedded verbatim, with no escaping.
    pub fn classified_question(classification: Classification, question: &str) -> String {
        format!(
            "Classified as {} question. User asked: {}. Provide a helpful response.",
            classification, question
        )
    }
}
