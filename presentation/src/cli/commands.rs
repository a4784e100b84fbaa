//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for triage
#[derive(Parser, Debug)]
#[command(name = "triage")]
#[command(author, version, about = "Route questions to a math engine or an LLM")]
#[command(long_about = r#"
Triage classifies each question as math, opinion or factual.

Math questions are parsed and simplified locally. Opinion and factual
questions are sent to an Ollama model with a short routing prompt.

Without a QUESTION, an interactive loop starts; type 'quit' to leave.

Configuration files are loaded from (in priority order):
1. TRIAGE_* environment variables (e.g. TRIAGE_LLM__MODEL=phi3)
2. --config <path>     Explicit config file
3. ./triage.toml       Project-level config
4. ~/.config/triage/config.toml   Global config

Example:
  triage "x^2 + 2*x + 1"
  triage -m mistral "What is the capital of France?"
  triage --classify "Do you think Rust is fun?"
"#)]
pub struct Cli {
    /// The question to answer (starts the interactive loop when omitted)
    #[arg(allow_hyphen_values = true)]
    pub question: Option<String>,

    /// Print only the classification, without answering
    #[arg(long)]
    pub classify: bool,

    /// Ollama model to generate with
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Base URL of the Ollama server
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Sampling temperature (0.0 - 2.0)
    #[arg(long, value_name = "T")]
    pub temperature: Option<f64>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the banner and progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Append a JSONL transcript of answered questions to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
