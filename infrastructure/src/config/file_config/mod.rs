//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Every section is optional; missing keys take their defaults.

mod llm;
mod logging;
mod output;
mod repl;

pub use llm::{
    DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT_SECONDS, FileLlmConfig,
};
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use repl::FileReplConfig;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration validation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    #[error("llm.model cannot be empty")]
    EmptyModelName,

    #[error("llm.base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("llm.temperature must be between 0.0 and 2.0 (got {0})")]
    InvalidTemperature(f64),

    #[error("llm.timeout_seconds cannot be 0")]
    InvalidTimeout,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// LLM backend settings
    pub llm: FileLlmConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Conversation log settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration, returning every problem found.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        if self.llm.model.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyModelName);
        }
        if self.llm.base_url.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyBaseUrl);
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            issues.push(ConfigValidationError::InvalidTemperature(
                self.llm.temperature,
            ));
        }
        if self.llm.timeout_seconds == 0 {
            issues.push(ConfigValidationError::InvalidTimeout);
        }

        issues
    }

    /// Resolved REPL history path, if one is configured.
    pub fn history_path(&self) -> Option<PathBuf> {
        self.repl.history_file.as_deref().map(expand_home)
    }

    /// Resolved conversation log path, if one is configured.
    pub fn conversation_log_path(&self) -> Option<PathBuf> {
        self.logging.conversation_log.as_deref().map(expand_home)
    }
}

/// Expand a leading `~/` to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[llm]
base_url = "http://gpu-box:11434"
model = "mistral"
temperature = 0.2
timeout_seconds = 30

[repl]
show_progress = false
history_file = "/tmp/triage-history.txt"

[output]
color = false

[logging]
conversation_log = "/tmp/triage.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.llm.base_url, "http://gpu-box:11434");
        assert_eq!(config.llm.model, "mistral");
        assert_eq!(config.llm.temperature, 0.2);
        assert_eq!(config.llm.timeout_seconds, 30);
        assert!(!config.repl.show_progress);
        assert!(!config.output.color);
        assert_eq!(
            config.conversation_log_path(),
            Some(PathBuf::from("/tmp/triage.jsonl"))
        );
        assert_eq!(
            config.history_path(),
            Some(PathBuf::from("/tmp/triage-history.txt"))
        );
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: FileConfig = toml::from_str("[llm]\nmodel = \"phi3\"\n").unwrap();
        assert_eq!(config.llm.model, "phi3");
        // Defaults should apply
        assert_eq!(config.llm.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.llm.temperature, DEFAULT_TEMPERATURE);
        assert!(config.output.color);
        assert!(config.repl.show_progress);
        assert!(config.logging.conversation_log.is_none());
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.llm.model, "llama3");
        assert_eq!(config.llm.base_url, "http://127.0.0.1:11434");
        assert_eq!(config.llm.timeout_seconds, 120);
        assert!(config.history_path().is_none());
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(FileConfig::default().validate().is_empty());
    }

    #[test]
    fn test_validate_reports_every_issue() {
        let toml_str = r#"
[llm]
base_url = ""
model = "  "
temperature = 3.5
timeout_seconds = 0
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.validate(),
            vec![
                ConfigValidationError::EmptyModelName,
                ConfigValidationError::EmptyBaseUrl,
                ConfigValidationError::InvalidTemperature(3.5),
                ConfigValidationError::InvalidTimeout,
            ]
        );
    }

    #[test]
    fn test_temperature_bounds_are_inclusive() {
        let mut config = FileConfig::default();
        config.llm.temperature = 0.0;
        assert!(config.validate().is_empty());
        config.llm.temperature = 2.0;
        assert!(config.validate().is_empty());
        config.llm.temperature = -0.1;
        assert_eq!(
            config.validate(),
            vec![ConfigValidationError::InvalidTemperature(-0.1)]
        );
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/abs/path"), PathBuf::from("/abs/path"));
        assert_eq!(expand_home("relative"), PathBuf::from("relative"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/x.txt"), home.join("x.txt"));
        }
    }

    #[test]
    fn test_serializes_back_to_toml() {
        let text = toml::to_string(&FileConfig::default()).unwrap();
        assert!(text.contains("[llm]"));
        assert!(text.contains("model = \"llama3\""));
    }
}
