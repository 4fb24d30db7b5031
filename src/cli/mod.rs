//! Command-line interface definitions.

pub mod check;
pub mod migrate;
pub mod output;
pub mod tables;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;

/// photofeed - schema tooling for the photofeed data model.
#[derive(Parser, Debug)]
#[command(name = "photofeed")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the user, post, comment, and follower tables
    Migrate(DatabaseArgs),

    /// Show the tables and columns present in the database
    Tables(DatabaseArgs),

    /// Validate the configuration file without touching the database
    Check(DatabaseArgs),
}

/// Arguments shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "photofeed.toml")]
    pub config: PathBuf,

    /// Override the database URL (also read from DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Override log level or filter directives (e.g. `photofeed=debug,diesel=warn`)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty
    #[arg(long)]
    pub json_logs: bool,
}

impl DatabaseArgs {
    /// Load the configuration file (defaults if absent) and apply flag overrides.
    ///
    /// # Errors
    /// Returns an error if the file is invalid or an override is.
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_or_default(&self.config)?;
        config.override_database_url(self.database_url.clone());
        if let Some(ref level) = self.log_level {
            config.logging.level = level.clone();
        }
        if self.json_logs {
            config.logging.format = "json".to_string();
        }
        config.logging.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> DatabaseArgs {
        let mut argv = vec!["photofeed", "migrate", "--config", "/nonexistent/photofeed.toml"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Migrate(args) => args,
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn flags_override_defaults() {
        let config = args(&["--database-url", ":memory:", "--log-level", "debug", "--json-logs"])
            .load_config()
            .unwrap();

        assert_eq!(config.database.url, ":memory:");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn invalid_log_level_flag_is_rejected() {
        assert!(args(&["--log-level", "photofeed=chatty"]).load_config().is_err());
    }

    #[test]
    fn default_config_path() {
        let cli = Cli::parse_from(["photofeed", "tables"]);
        match cli.command {
            Commands::Tables(args) => assert_eq!(args.config, PathBuf::from("photofeed.toml")),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
