//! Progress notification port
//!
//! Defines the interface for reporting progress while a question is answered.

use triage_domain::Classification;

/// Callback for progress updates while answering a question
///
/// Implementations live in the presentation layer (e.g. a terminal spinner).
/// Math questions finish synchronously and only see `on_classified`.
pub trait AnswerProgressNotifier: Send + Sync {
    /// Called once the question has been classified
    fn on_classified(&self, _classification: Classification) {}

    /// Called right before the LLM backend is invoked
    fn on_generation_start(&self, _backend: &str) {}

    /// Called when the LLM backend returns, successfully or not
    fn on_generation_end(&self, _success: bool) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoAnswerProgress;

impl AnswerProgressNotifier for NoAnswerProgress {}
