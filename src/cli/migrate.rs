//! Handler for the `migrate` command.

use tracing::info;

use crate::cli::{output, DatabaseArgs};
use crate::db::{create_pool, run_migrations};
use crate::error::Result;

/// Apply any pending schema migrations.
pub fn execute(args: &DatabaseArgs) -> Result<()> {
    let config = args.load_config()?;
    config.init_logging();

    info!(url = %config.database.url, "Applying schema");
    let pool = create_pool(&config.database)?;
    let applied = run_migrations(&pool)?;

    if applied == 0 {
        output::success("Schema is up to date");
    } else {
        output::success(&format!("Applied {applied} migration(s)"));
    }
    Ok(())
}
