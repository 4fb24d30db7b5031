//! Application configuration loading and validation.
//!
//! Configuration is read from a TOML file. Every section is optional and
//! falls back to its defaults; `DATABASE_URL` in the environment (or a
//! `.env` file loaded by the binary) overrides `database.url`.
//!
//! # Example
//!
//! ```no_run
//! use photofeed::config::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("photofeed.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

mod database;
mod logging;

pub use database::DatabaseConfig;
pub use logging::LoggingConfig;

use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use crate::error::{ConfigError, Result};

/// Environment variable that overrides `database.url`.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file, then apply environment overrides.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, fails to parse, or
    /// contains invalid values.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let mut config: Self = toml::from_str(&content).map_err(ConfigError::Parse)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    ///
    /// # Errors
    /// Returns an error if an existing file is unreadable or invalid.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }
        debug!(path = %path.display(), "Config file not found, using defaults");
        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate configuration from TOML text. No environment
    /// overrides are applied.
    ///
    /// # Errors
    /// Returns an error if the text fails to parse or contains invalid values.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Replace `database.url` when one is given.
    pub fn override_database_url(&mut self, url: Option<String>) {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.database.url = url;
        }
    }

    fn apply_env_overrides(&mut self) {
        self.override_database_url(std::env::var(DATABASE_URL_ENV).ok());
    }

    fn validate(&self) -> Result<()> {
        self.database.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Initialize the global tracing subscriber from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn empty_document_yields_defaults() {
        let config = Config::parse_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.database.url, "photofeed.db");
        assert_eq!(config.database.max_connections, 5);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = Config::parse_toml(
            r#"
[database]
url = "/var/lib/photofeed/feed.db"

[logging]
format = "json"
"#,
        )
        .unwrap();

        assert_eq!(config.database.url, "/var/lib/photofeed/feed.db");
        assert_eq!(config.database.busy_timeout_ms, 5000);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn rejects_zero_connections() {
        let result = Config::parse_toml("[database]\nmax_connections = 0\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "database.max_connections",
                ..
            }))
        ));
    }

    #[test]
    fn rejects_blank_url() {
        let result = Config::parse_toml("[database]\nurl = \"  \"\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingField {
                field: "database.url"
            }))
        ));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let result = Config::parse_toml("[database\nurl = ");
        assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
    }

    #[test]
    fn override_ignores_blank_values() {
        let mut config = Config::default();
        config.override_database_url(Some(String::new()));
        assert_eq!(config.database.url, "photofeed.db");

        config.override_database_url(Some(":memory:".into()));
        assert_eq!(config.database.url, ":memory:");
    }
}
