//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Project-level config file names, checked in order
pub const PROJECT_CONFIG_FILES: [&str; 2] = ["triage.toml", ".triage.toml"];

/// Prefix for environment overrides (`TRIAGE_LLM__MODEL=phi3`)
pub const ENV_PREFIX: &str = "TRIAGE_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables prefixed `TRIAGE_` (`__` separates sections)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./triage.toml` or `./.triage.toml`
    /// 4. Global config: `$XDG_CONFIG_HOME/triage/config.toml`
    /// 5. Default values
    ///
    /// CLI flags are applied on top of the result by the caller.
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(
            Self::global_config_path().as_deref(),
            Self::project_config_path().as_deref(),
            config_path.map(PathBuf::as_path),
        )
        .merge(Self::env())
        .extract()
        .map_err(Box::new)
    }

    /// `TRIAGE_LLM__MODEL=phi3` sets `llm.model`.
    fn env() -> Env {
        Env::prefixed(ENV_PREFIX).split("__")
    }

    /// Merge defaults and the given files, lowest priority first.
    fn figment(global: Option<&Path>, project: Option<&Path>, explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        for path in [global, project, explicit].into_iter().flatten() {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        figment
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// `$XDG_CONFIG_HOME/triage/config.toml` on Linux, the platform
    /// equivalent elsewhere.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("triage").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Default REPL history location
    pub fn default_history_path() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("triage").join("history.txt"))
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources() {
        println!("Configuration sources (in priority order):");
        println!("  [     ] Environment: {}*", ENV_PREFIX);

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./triage.toml or ./.triage.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("triage"));
        assert!(path.ends_with("config.toml"));
    }

    #[test]
    fn test_figment_without_files_yields_defaults() {
        let config: FileConfig = ConfigLoader::figment(None, None, None).extract().unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_later_files_override_earlier_ones() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        let project = dir.path().join("triage.toml");
        let explicit = dir.path().join("explicit.toml");
        fs::write(&global, "[llm]\nmodel = \"global\"\ntemperature = 0.1\n").unwrap();
        fs::write(&project, "[llm]\nmodel = \"project\"\n[output]\ncolor = false\n").unwrap();
        fs::write(&explicit, "[llm]\nmodel = \"explicit\"\n").unwrap();

        let config: FileConfig = ConfigLoader::figment(
            Some(global.as_path()),
            Some(project.as_path()),
            Some(explicit.as_path()),
        )
        .extract()
        .unwrap();

        assert_eq!(config.llm.model, "explicit");
        // Keys not overridden survive from lower layers
        assert_eq!(config.llm.temperature, 0.1);
        assert!(!config.output.color);
        assert_eq!(config.llm.base_url, "http://127.0.0.1:11434");
    }

    #[test]
    fn test_missing_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let config: FileConfig = ConfigLoader::figment(Some(missing.as_path()), None, None)
            .extract()
            .unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_env_overrides_file_values() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("triage.toml", "[llm]\nmodel = \"llama3\"\ntemperature = 0.2\n")?;
            jail.set_env("TRIAGE_LLM__MODEL", "phi3");
            jail.set_env("TRIAGE_REPL__SHOW_PROGRESS", "false");

            let config: FileConfig =
                ConfigLoader::figment(None, Some(Path::new("triage.toml")), None)
                    .merge(ConfigLoader::env())
                    .extract()?;

            assert_eq!(config.llm.model, "phi3");
            assert_eq!(config.llm.temperature, 0.2);
            assert!(!config.repl.show_progress);
            Ok(())
        });
    }

    #[test]
    fn test_load_merges_project_file_and_env() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("triage.toml", "[llm]\nmodel = \"mistral\"\n")?;
            jail.create_file("explicit.toml", "[output]\ncolor = false\n")?;
            jail.set_env("TRIAGE_LLM__BASE_URL", "http://gpu:11434");

            let explicit = PathBuf::from("explicit.toml");
            let config = ConfigLoader::load(Some(&explicit)).map_err(|e| *e)?;

            assert_eq!(config.llm.model, "mistral");
            assert_eq!(config.llm.base_url, "http://gpu:11434");
            assert!(!config.output.color);
            Ok(())
        });
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.toml");
        fs::write(&bad, "[llm]\ntimeout_seconds = \"soon\"\n").unwrap();
        let result: Result<FileConfig, _> = ConfigLoader::figment(None, None, Some(bad.as_path())).extract();
        assert!(result.is_err());
    }
}
