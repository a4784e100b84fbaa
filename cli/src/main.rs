//! CLI entrypoint for triage
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use triage_application::{
    AnswerProgressNotifier, AnswerQuestionUseCase, ConversationLogger, NoAnswerProgress,
};
use triage_domain::{Question, classify};
use triage_infrastructure::{
    ConfigLoader, FileConfig, JsonlConversationLogger, OllamaConfig, OllamaLlmGateway,
};
use triage_presentation::{AskRepl, Cli, ConsoleFormatter, ProgressReporter, SimpleProgress};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    info!("Starting triage");

    let config = load_config(&cli)?;

    if !config.output.color {
        colored::control::set_override(false);
    }

    // --classify needs no backend at all
    if cli.classify
        && let Some(question) = &cli.question
    {
        println!(
            "{}",
            ConsoleFormatter::format_classification(classify(question))
        );
        return Ok(());
    }

    // === Dependency Injection ===
    let gateway = OllamaLlmGateway::new(OllamaConfig::from(&config.llm))
        .context("Failed to create the Ollama client")?;
    let mut use_case = AnswerQuestionUseCase::new(Arc::new(gateway));

    if let Some(path) = config.conversation_log_path() {
        match JsonlConversationLogger::new(&path) {
            Some(logger) => {
                info!("Conversation log: {}", path.display());
                let logger: Arc<dyn ConversationLogger> = Arc::new(logger);
                use_case = use_case.with_conversation_logger(logger);
            }
            None => warn!("Conversation log disabled: cannot open {}", path.display()),
        }
    }

    let show_progress = config.repl.show_progress && !cli.quiet;

    // Single question mode
    if let Some(question) = &cli.question {
        let progress: Box<dyn AnswerProgressNotifier> = if !show_progress {
            Box::new(NoAnswerProgress)
        } else if cli.verbose > 0 {
            // A spinner would fight with log lines on stderr.
            Box::new(SimpleProgress)
        } else {
            Box::new(ProgressReporter::new())
        };
        let answer = use_case
            .execute(&Question::new(question.as_str()), progress.as_ref())
            .await;
        println!("{}", ConsoleFormatter::format_answer(&answer));
        return Ok(());
    }

    let history = config
        .history_path()
        .or_else(ConfigLoader::default_history_path);

    AskRepl::new(use_case)
        .with_progress(show_progress)
        .with_banner(!cli.quiet)
        .with_classify_only(cli.classify)
        .with_history(history)
        .run()
        .await?;

    Ok(())
}

/// Load configuration files and apply command-line overrides.
fn load_config(cli: &Cli) -> Result<FileConfig> {
    if let Some(path) = &cli.config
        && !path.exists()
    {
        bail!("Config file not found: {}", path.display());
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };

    if let Some(model) = &cli.model {
        config.llm.model = model.clone();
    }
    if let Some(base_url) = &cli.base_url {
        config.llm.base_url = base_url.clone();
    }
    if let Some(temperature) = cli.temperature {
        config.llm.temperature = temperature;
    }
    if let Some(timeout) = cli.timeout {
        config.llm.timeout_seconds = timeout;
    }
    if let Some(log_file) = &cli.log_file {
        config.logging.conversation_log = Some(log_file.to_string_lossy().into_owned());
    }

    let issues = config.validate();
    if !issues.is_empty() {
        let joined = issues
            .iter()
            .map(|issue| issue.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        bail!("Invalid configuration: {}", joined);
    }

    Ok(config)
}
