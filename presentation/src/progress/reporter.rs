//! Progress reporting while a question is answered

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;
use triage_application::AnswerProgressNotifier;
use triage_domain::Classification;

/// Shows a spinner while the LLM backend is generating
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl AnswerProgressNotifier for ProgressReporter {
    fn on_generation_start(&self, backend: &str) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_message(format!("Asking {}...", backend.cyan()));
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut slot) = self.spinner.lock() {
            *slot = Some(pb);
        }
    }

    fn on_generation_end(&self, _success: bool) {
        if let Ok(mut slot) = self.spinner.lock()
            && let Some(pb) = slot.take()
        {
            pb.finish_and_clear();
        }
    }
}

/// Plain-text progress for `-v` runs, one line per step
pub struct SimpleProgress;

impl AnswerProgressNotifier for SimpleProgress {
    fn on_classified(&self, classification: Classification) {
        eprintln!("{} classified as {}", "->".cyan(), classification.as_str().bold());
    }

    fn on_generation_start(&self, backend: &str) {
        eprintln!("{} asking {}", "->".cyan(), backend);
    }

    fn on_generation_end(&self, success: bool) {
        if success {
            eprintln!("  {} response received", "v".green());
        } else {
            eprintln!("  {} request failed", "x".red());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_lifecycle() {
        let reporter = ProgressReporter::new();
        reporter.on_classified(Classification::Factual);
        reporter.on_generation_start("ollama:llama3");
        assert!(reporter.spinner.lock().unwrap().is_some());
        reporter.on_generation_end(true);
        assert!(reporter.spinner.lock().unwrap().is_none());
    }

    #[test]
    fn test_end_without_start_is_harmless() {
        let reporter = ProgressReporter::default();
        reporter.on_generation_end(false);
        assert!(reporter.spinner.lock().unwrap().is_none());
    }
}
