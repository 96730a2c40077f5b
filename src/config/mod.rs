//! Configuration management.
//!
//! Settings come from, in increasing priority: built-in defaults, a TOML
//! file, `PAPER_SEARCH_*` environment variables, then CLI flags.

mod file_config;

pub use file_config::{default_config_path, find_config_file, to_toml_string, write_config};

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::render::{ProjectionMode, Projector};
use crate::utils::{DisplayBudget, DEFAULT_USER_AGENT};

/// Environment variable prefix, e.g. `PAPER_SEARCH_API__BASE_URL`
pub const ENV_PREFIX: &str = "PAPER_SEARCH";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Search API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Result display settings
    #[serde(default)]
    pub display: DisplayConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Check values that deserialization alone cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        url::Url::parse(&self.api.base_url).map_err(|e| {
            ConfigError::Invalid(format!("api.base_url '{}': {}", self.api.base_url, e))
        })?;

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "api.timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Search API configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Scheme, host and optional path prefix of the search service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// User-Agent header sent with each request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

/// Result display configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// `full` or `title_only`
    #[serde(default)]
    pub mode: ProjectionMode,

    /// Maximum characters of the comma-joined author list
    #[serde(default = "default_author_budget")]
    pub author_budget: DisplayBudget,

    /// Maximum characters of the snippet
    #[serde(default = "default_snippet_budget")]
    pub snippet_budget: DisplayBudget,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            mode: ProjectionMode::default(),
            author_budget: default_author_budget(),
            snippet_budget: default_snippet_budget(),
        }
    }
}

impl DisplayConfig {
    /// Build the projector these settings describe
    pub fn projector(&self) -> Projector {
        Projector::new(self.mode)
            .author_budget(self.author_budget)
            .snippet_budget(self.snippet_budget)
    }
}

fn default_author_budget() -> DisplayBudget {
    DisplayBudget::AUTHORS
}

fn default_snippet_budget() -> DisplayBudget {
    DisplayBudget::SNIPPET
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level when neither RUST_LOG nor -v/-q is given
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Load configuration from an optional file plus the environment
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path));
    }

    let settings = builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    let config: Config = settings.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

/// Get the default configuration
pub fn get_config() -> Config {
    Config::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.display.mode, ProjectionMode::Full);
        assert_eq!(config.display.author_budget.get(), 100);
        assert_eq!(config.display.snippet_budget.get(), 250);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_load_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[api]
base_url = "https://search.example.org"
timeout_secs = 5

[display]
mode = "title_only"
author_budget = 40
"#,
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.api.base_url, "https://search.example.org");
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.display.mode, ProjectionMode::TitleOnly);
        assert_eq!(config.display.author_budget.get(), 40);
        assert_eq!(config.display.snippet_budget.get(), 250);
    }

    #[test]
    #[serial]
    fn test_load_config_rejects_negative_budget() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[display]\nsnippet_budget = -10\n").unwrap();

        assert!(matches!(
            load_config(Some(&path)),
            Err(ConfigError::Load(_))
        ));
    }

    #[test]
    #[serial]
    fn test_load_config_rejects_zero_timeout() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api]\ntimeout_secs = 0\n").unwrap();

        assert!(matches!(
            load_config(Some(&path)),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    #[serial]
    fn test_load_config_nonexistent_file() {
        let path = std::path::PathBuf::from("/nonexistent/paper-search.toml");
        assert!(load_config(Some(&path)).is_err());
    }

    #[test]
    #[serial]
    fn test_env_override() {
        std::env::set_var("PAPER_SEARCH_LOGGING__LEVEL", "trace");
        let config = load_config(None);
        std::env::remove_var("PAPER_SEARCH_LOGGING__LEVEL");

        assert_eq!(config.unwrap().logging.level, "trace");
    }

    #[test]
    #[serial]
    fn test_env_override_display_budget_and_mode() {
        std::env::set_var("PAPER_SEARCH_DISPLAY__AUTHOR_BUDGET", "50");
        std::env::set_var("PAPER_SEARCH_DISPLAY__MODE", "title_only");
        let config = load_config(None);
        std::env::remove_var("PAPER_SEARCH_DISPLAY__AUTHOR_BUDGET");
        std::env::remove_var("PAPER_SEARCH_DISPLAY__MODE");

        let display = config.unwrap().display;
        assert_eq!(display.author_budget, DisplayBudget::new(50));
        assert_eq!(display.mode, ProjectionMode::TitleOnly);
        assert_eq!(display.snippet_budget, DisplayBudget::SNIPPET);
    }

    #[test]
    #[serial]
    fn test_env_rejects_negative_budget() {
        std::env::set_var("PAPER_SEARCH_DISPLAY__SNIPPET_BUDGET", "-3");
        let config = load_config(None);
        std::env::remove_var("PAPER_SEARCH_DISPLAY__SNIPPET_BUDGET");

        match config {
            Err(ConfigError::Load(e)) => assert!(e.to_string().contains("-3")),
            other => panic!("Expected a load error, got {:?}", other),
        }
    }

    #[test]
    fn test_display_config_projector() {
        let display = DisplayConfig {
            mode: ProjectionMode::TitleOnly,
            ..Default::default()
        };
        assert_eq!(display.projector().mode(), ProjectionMode::TitleOnly);
    }
}
