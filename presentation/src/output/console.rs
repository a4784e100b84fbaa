//! Console output formatter for answers

use colored::Colorize;
use triage_application::{Answer, LLM_ERROR_PREFIX};
use triage_domain::{Classification, MATH_ERROR_PREFIX, MATH_RESULT_PREFIX};

/// Formats answers for console display
///
/// Only prefixes are styled, so the text is unchanged when color is off.
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format an answer with its prefix highlighted
    pub fn format_answer(answer: &Answer) -> String {
        match answer {
            Answer::MathResult(result) => {
                format!("{}{}", MATH_RESULT_PREFIX.green().bold(), result)
            }
            Answer::MathError(message) => {
                format!("{}{}", MATH_ERROR_PREFIX.red().bold(), message)
            }
            Answer::Generated { text, .. } => text.clone(),
            Answer::LlmError { message, .. } => {
                format!("{}{}", LLM_ERROR_PREFIX.red().bold(), message)
            }
        }
    }

    /// Format a classification tag for `--classify` output
    pub fn format_classification(classification: Classification) -> String {
        let tag = classification.as_str();
        match classification {
            Classification::Math => tag.green().to_string(),
            Classification::Opinion => tag.magenta().to_string(),
            Classification::Factual => tag.cyan().to_string(),
        }
    }

    /// Banner shown when the interactive loop starts
    pub fn welcome(backend: &str) -> String {
        let line = "=".repeat(48);
        format!(
            "{}\n{:^48}\n{}\n{} {}\n",
            line.cyan(),
            "Triage - math, opinion or fact".bold(),
            line.cyan(),
            "Backend:".dimmed(),
            backend
        )
    }
}
