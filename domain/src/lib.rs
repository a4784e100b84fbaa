//! Domain layer for triage
//!
//! This crate contains the core business logic and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Classification**: every question is sorted into math, opinion or factual
//!   by [`classify`].
//! - **Math**: math questions are parsed and simplified locally by the
//!   [`math`] engine.
//! - **Prompt**: other questions become a [`PromptTemplate`] prompt for an LLM.

pub mod classification;
pub mod core;
pub mod math;
pub mod prompt;

// Re-export commonly used types
pub use classification::{Classification, classify};
pub use core::question::Question;
pub use math::{
    MATH_ERROR_PREFIX, MATH_RESULT_PREFIX, MathError, Simplified, evaluate, evaluate_math,
};
pub use prompt::PromptTemplate;
