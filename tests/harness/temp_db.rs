use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::SqliteConnection;
use photofeed::config::DatabaseConfig;
use photofeed::db::{create_pool, run_migrations, DbPool};
use tempfile::TempDir;

/// Temporary migrated SQLite database for integration tests.
///
/// The file lives in a temporary directory removed on drop.
pub struct TempDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TempDb {
    pub fn create(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = DatabaseConfig {
            url: dir.path().join(format!("{name}.db")).display().to_string(),
            max_connections: 8,
            ..Default::default()
        };

        let pool = create_pool(&config).expect("create sqlite pool");
        run_migrations(&pool).expect("run migrations");

        Self { _dir: dir, pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn conn(&self) -> PooledConnection<ConnectionManager<SqliteConnection>> {
        self.pool.get().expect("get sqlite connection")
    }
}
