//! Interactive question loop
//!
//! Provides a readline-based prompt that answers one question per line.

mod repl;

pub use repl::{AskRepl, PROMPT, is_quit};
