//! Logging configuration and initialization.

use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{ConfigError, Result};

const FORMATS: [&str; 2] = ["pretty", "json"];

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    ///
    /// `RUST_LOG` takes precedence over the configured level.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        EnvFilter::try_new(&self.level).map_err(|e| ConfigError::InvalidValue {
            field: "logging.level",
            reason: e.to_string(),
        })?;
        if !FORMATS.contains(&self.format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("expected one of {}", FORMATS.join(", ")),
            }
            .into());
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn default_is_valid() {
        assert!(LoggingConfig::default().validate().is_ok());
    }

    #[test]
    fn accepts_filter_directives() {
        for level in ["INFO", "photofeed=debug,diesel=warn", "warn,photofeed::db=trace"] {
            let config = LoggingConfig {
                level: level.into(),
                ..Default::default()
            };
            assert!(config.validate().is_ok(), "{level} should be accepted");
        }
    }

    #[test]
    fn rejects_unknown_level() {
        let config = LoggingConfig {
            level: "photofeed=loud".into(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::Config(ConfigError::InvalidValue {
                field: "logging.level",
                ..
            }))
        ));
    }

    #[test]
    fn rejects_unknown_format() {
        let config = LoggingConfig {
            format: "xml".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
