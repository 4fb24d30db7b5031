//! Handler for the `check` command.

use crate::cli::{output, DatabaseArgs};
use crate::config::DATABASE_URL_ENV;
use crate::error::Result;

/// Validate configuration without opening the database.
pub fn execute(args: &DatabaseArgs) -> Result<()> {
    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Configuration");

    if !args.config.exists() {
        output::warning(&format!(
            "{} not found, using defaults",
            args.config.display()
        ));
    }

    let config = args.load_config()?;
    output::field("database.url", &config.database.url);
    output::field("max_connections", config.database.max_connections);
    output::field("busy_timeout_ms", config.database.busy_timeout_ms);
    output::field("logging.level", &config.logging.level);
    output::field("logging.format", &config.logging.format);

    if std::env::var(DATABASE_URL_ENV).is_ok() && args.database_url.is_none() {
        output::warning(&format!("database.url taken from {DATABASE_URL_ENV}"));
    }

    output::success("Configuration is valid");
    Ok(())
}
