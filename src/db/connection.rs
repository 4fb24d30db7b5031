//! Database connection management using Diesel ORM.
//!
//! Provides connection pooling, migration support, and per-connection
//! SQLite configuration. SQLite leaves foreign-key enforcement off unless a
//! connection asks for it, so every connection handed out here does.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::path::Path;
use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::error::{Error, Result};

/// Embedded database migrations compiled from the migrations/ directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Type alias for a SQLite connection pool.
pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// Busy timeout used by [`establish`].
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5000;

/// Pragmas applied to each pooled connection as it is acquired.
#[derive(Debug, Clone, Copy)]
pub struct SqlitePragmas {
    pub busy_timeout_ms: u32,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(
        &self,
        conn: &mut SqliteConnection,
    ) -> std::result::Result<(), diesel::r2d2::Error> {
        configure_sqlite_connection(conn, self.busy_timeout_ms)
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Enable foreign-key enforcement and set the busy timeout.
///
/// # Errors
/// Returns an error if a pragma fails to apply.
pub fn configure_sqlite_connection(
    conn: &mut SqliteConnection,
    busy_timeout_ms: u32,
) -> QueryResult<()> {
    conn.batch_execute(&format!(
        "PRAGMA foreign_keys = ON; PRAGMA busy_timeout = {busy_timeout_ms};"
    ))
}

/// Create a connection pool for the configured database.
///
/// # Errors
/// Returns an error if the pool cannot be created.
pub fn create_pool(config: &DatabaseConfig) -> Result<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(config.url.as_str());
    let pool = Pool::builder()
        .max_size(config.max_connections)
        .connection_customizer(Box::new(SqlitePragmas {
            busy_timeout_ms: config.busy_timeout_ms,
        }))
        .build(manager)
        .map_err(|e| Error::Connection(e.to_string()))?;

    info!(
        url = %config.url,
        max_connections = config.max_connections,
        "Database pool created"
    );
    Ok(pool)
}

/// Open a single configured connection, outside any pool.
///
/// # Errors
/// Returns an error if the database cannot be opened or configured.
pub fn establish(database_url: &str) -> Result<SqliteConnection> {
    let mut conn = SqliteConnection::establish(database_url)?;
    configure_sqlite_connection(&mut conn, DEFAULT_BUSY_TIMEOUT_MS)?;
    debug!(url = %database_url, "Database connection established");
    Ok(conn)
}

/// Whether `database_url` names a database that is already there.
///
/// Plain paths must exist on disk. `:memory:` and `file:` URIs are left to
/// SQLite.
#[must_use]
pub fn database_exists(database_url: &str) -> bool {
    database_url == ":memory:"
        || database_url.starts_with("file:")
        || Path::new(database_url).is_file()
}

/// Open a pool for a database that must already exist, without creating
/// a file at a mistyped path.
///
/// # Errors
/// Returns [`Error::Connection`] if the file is missing or the pool cannot
/// be created.
pub fn open_existing(config: &DatabaseConfig) -> Result<DbPool> {
    if !database_exists(&config.url) {
        return Err(Error::Connection(format!("database not found: {}", config.url)));
    }
    create_pool(config)
}

/// Run all pending database migrations on a pooled connection.
///
/// # Errors
/// Returns an error if a connection cannot be acquired or migrations fail.
pub fn run_migrations(pool: &DbPool) -> Result<usize> {
    let mut conn = pool.get()?;
    run_migrations_on(&mut conn)
}

/// Run all pending database migrations on `conn`, returning how many ran.
///
/// # Errors
/// Returns an error if a migration fails.
pub fn run_migrations_on(conn: &mut SqliteConnection) -> Result<usize> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| Error::Migration(e.to_string()))?;

    for version in &applied {
        debug!(version = %version, "Applied migration");
    }
    info!(applied = applied.len(), "Database migrations complete");
    Ok(applied.len())
}
