//! Question classification.
//!
//! [`classify`] sorts a question into one of three [`Classification`]s using
//! shallow lexical cues. The rules are checked in order and the first match wins:
//!
//! 1. Any ASCII digit or one of `+ - * / ^ = ( )` → [`Classification::Math`]
//! 2. Any of `think`, `feel`, `opinion`, `believe` in the lower-cased text
//!    → [`Classification::Opinion`]
//! 3. Otherwise → [`Classification::Factual`]
//!
//! `"What happened in 1969"` is therefore math. That is a known limitation of
//! the heuristic and is kept on purpose so results stay predictable.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Characters that mark a question as math.
const MATH_CHARS: &str = "0123456789+-*/^=()";

/// Substrings that mark a question as asking for an opinion.
const OPINION_KEYWORDS: [&str; 4] = ["think", "feel", "opinion", "believe"];

/// The kind of question being asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// Answered locally by the math engine
    Math,
    /// Forwarded to the LLM as an opinion question
    Opinion,
    /// Forwarded to the LLM as a factual question
    Factual,
}

impl Classification {
    /// All classifications, in rule order.
    pub const ALL: [Classification; 3] = [
        Classification::Math,
        Classification::Opinion,
        Classification::Factual,
    ];

    /// The lowercase tag used in prompts and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Math => "math",
            Classification::Opinion => "opinion",
            Classification::Factual => "factual",
        }
    }

    /// Whether questions of this kind are answered without an LLM.
    pub fn is_local(&self) -> bool {
        matches!(self, Classification::Math)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Classification {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "math" => Ok(Classification::Math),
            "opinion" => Ok(Classification::Opinion),
            "factual" => Ok(Classification::Factual),
            _ => Err(format!("Invalid classification: {}", s)),
        }
    }
}

/// Classify a question. Total and deterministic.
pub fn classify(question: &str) -> Classification {
    if question.chars().any(|c| MATH_CHARS.contains(c)) {
        return Classification::Math;
    }
    let lowered = question.to_lowercase();
    if OPINION_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        return Classification::Opinion;
    }
    Classification::Factual
}
