//! REPL (Read-Eval-Print Loop) for interactive questions

use crate::ConsoleFormatter;
use crate::ProgressReporter;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::PathBuf;
use tracing::debug;
use triage_application::{AnswerQuestionUseCase, NoAnswerProgress};
use triage_domain::Question;

/// Prompt shown before each question.
pub const PROMPT: &str = "Ask a question (or type 'quit' to exit): ";

/// True when `line` is exactly `quit`, in any letter case.
pub fn is_quit(line: &str) -> bool {
    line.eq_ignore_ascii_case("quit")
}

/// Interactive question REPL
pub struct AskRepl {
    use_case: AnswerQuestionUseCase,
    show_progress: bool,
    show_banner: bool,
    classify_only: bool,
    history_path: Option<PathBuf>,
}

impl AskRepl {
    /// Create a new AskRepl
    pub fn new(use_case: AnswerQuestionUseCase) -> Self {
        Self {
            use_case,
            show_progress: true,
            show_banner: true,
            classify_only: false,
            history_path: None,
        }
    }

    /// Set whether to show a spinner while the LLM is working
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Set whether to print the welcome banner
    pub fn with_banner(mut self, show: bool) -> Self {
        self.show_banner = show;
        self
    }

    /// Only print the classification of each line
    pub fn with_classify_only(mut self, classify_only: bool) -> Self {
        self.classify_only = classify_only;
        self
    }

    /// Persist line history to `path`
    pub fn with_history(mut self, path: Option<PathBuf>) -> Self {
        self.history_path = path;
        self
    }

    /// Run the interactive REPL until `quit` or end of input
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        if let Some(ref path) = self.history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            if rl.load_history(path).is_err() {
                debug!("No history at {}", path.display());
            }
        }

        if self.show_banner {
            println!("{}", ConsoleFormatter::welcome(&self.use_case.backend()));
        }

        loop {
            match rl.readline(PROMPT) {
                Ok(line) => {
                    if is_quit(&line) {
                        break;
                    }
                    if !line.trim().is_empty() {
                        let _ = rl.add_history_entry(line.as_str());
                    }
                    self.process_line(&line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => break,
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = self.history_path
            && let Err(e) = rl.save_history(path)
        {
            debug!("Could not save history to {}: {}", path.display(), e);
        }

        Ok(())
    }

    async fn process_line(&self, line: &str) {
        let question = Question::new(line);

        if self.classify_only {
            println!(
                "{}",
                ConsoleFormatter::format_classification(question.classification())
            );
            return;
        }

        let answer = if self.show_progress {
            let progress = ProgressReporter::new();
            self.use_case.execute(&question, &progress).await
        } else {
            self.use_case.execute(&question, &NoAnswerProgress).await
        };
        println!("{}", ConsoleFormatter::format_answer(&answer));
    }
}
