//! Database connection settings.

use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// Where the SQLite database lives and how connections are pooled.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite database path, `sqlite://` URL, or `:memory:`.
    pub url: String,
    /// Upper bound on pooled connections.
    pub max_connections: u32,
    /// How long a connection waits on a locked database before failing.
    pub busy_timeout_ms: u32,
}

impl DatabaseConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "database.url",
            }
            .into());
        }
        if self.max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                field: "database.max_connections",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "photofeed.db".into(),
            max_connections: 5,
            busy_timeout_ms: 5000,
        }
    }
}
