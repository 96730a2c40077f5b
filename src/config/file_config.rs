//! Configuration file discovery and writing.
//!
//! # Configuration File Format
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8080"
//! timeout_secs = 30
//! user_agent = "paper-search/0.1.0"
//!
//! [display]
//! mode = "full"          # or "title_only"
//! author_budget = 100
//! snippet_budget = 250
//!
//! [logging]
//! level = "info"
//! ```

use std::path::{Path, PathBuf};

use super::{Config, ConfigError};

/// File name looked up in the working directory
const LOCAL_CONFIG_FILE: &str = "paper-search.toml";

/// `<config dir>/paper-search/config.toml`, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("paper-search").join("config.toml"))
}

/// Find a config file: `./paper-search.toml` first, then the user config dir
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }

    default_config_path().filter(|path| path.is_file())
}

/// Render a configuration as TOML
pub fn to_toml_string(config: &Config) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(config)?)
}

/// Write a configuration file, creating parent directories as needed
pub fn write_config(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(path, to_toml_string(config)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use crate::render::ProjectionMode;
    use tempfile::tempdir;

    #[test]
    fn test_write_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.api.base_url = "https://saved.example.org".to_string();
        config.display.mode = ProjectionMode::TitleOnly;

        write_config(&config, &path).unwrap();
        let loaded = load_config(Some(&path)).unwrap();

        assert_eq!(loaded.api.base_url, "https://saved.example.org");
        assert_eq!(loaded.display.mode, ProjectionMode::TitleOnly);
        assert_eq!(loaded.display.author_budget, config.display.author_budget);
    }

    #[test]
    fn test_toml_contains_sections() {
        let toml = to_toml_string(&Config::default()).unwrap();
        assert!(toml.contains("[api]"));
        assert!(toml.contains("author_budget = 100"));
        assert!(toml.contains("mode = \"full\""));
    }
}
