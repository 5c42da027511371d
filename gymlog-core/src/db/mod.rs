//! SQLite persistence: pooled connections, embedded migrations and query helpers.

pub mod models;
pub mod operations;
pub mod schema;

use diesel::SqliteConnection;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use log::{debug, info};
use std::fs;
use std::path::Path;
use thiserror::Error;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConn = PooledConnection<ConnectionManager<SqliteConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../migrations");

pub const DEFAULT_DATABASE_URL: &str = "database/app.db";

#[derive(Debug, Error)]
pub enum DbError {
    #[error("failed to prepare database directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("migration failed: {0}")]
    Migration(String),
}

/// Connection-wide PRAGMAs applied every time the pool hands out a connection.
#[derive(Debug, Clone, Copy)]
struct SqlitePragmas {
    wal: bool,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        let mut pragmas = String::from("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;");
        if self.wal {
            pragmas.push_str(" PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;");
        }
        conn.batch_execute(&pragmas)
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

fn is_file_database(database_url: &str) -> bool {
    !(database_url == ":memory:" || database_url.contains("mode=memory"))
}

/// Build a connection pool for `database_url`, creating the parent directory of a
/// file database when it does not exist yet.
pub fn connect(database_url: &str, max_size: u32) -> Result<DbPool, DbError> {
    let file_backed = is_file_database(database_url);
    if file_backed {
        let path = database_url.strip_prefix("sqlite://").unwrap_or(database_url);
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                debug!("Creating database directory {}", parent.display());
                fs::create_dir_all(parent)?;
            }
        }
    }

    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let pool = Pool::builder()
        .max_size(max_size.max(1))
        .connection_customizer(Box::new(SqlitePragmas { wal: file_backed }))
        .build(manager)?;
    info!("Opened database {} (pool size {})", database_url, max_size.max(1));
    Ok(pool)
}

pub fn run_migrations(conn: &mut SqliteConnection) -> Result<(), DbError> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| DbError::Migration(e.to_string()))?;
    for migration in &applied {
        info!("Applied migration {}", migration);
    }
    if applied.is_empty() {
        debug!("Database schema already up to date");
    }
    Ok(())
}

/// Drop every table by reverting all migrations, then rebuild the schema from scratch.
pub fn reset_database(conn: &mut SqliteConnection) -> Result<(), DbError> {
    info!("Resetting database schema");
    conn.revert_all_migrations(MIGRATIONS)
        .map_err(|e| DbError::Migration(e.to_string()))?;
    run_migrations(conn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::RunQueryDsl;
    use diesel::sql_types::BigInt;

    #[derive(diesel::QueryableByName)]
    struct Count {
        #[diesel(sql_type = BigInt)]
        n: i64,
    }

    #[test]
    fn migrations_apply_on_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("app.db");
        let pool = connect(path.to_str().unwrap(), 2).expect("pool");
        let mut conn = pool.get().unwrap();
        run_migrations(&mut conn).expect("migrations");
        // second run is a no-op
        run_migrations(&mut conn).expect("migrations again");

        conn.batch_execute(
            "INSERT INTO users (username, password_hash, created_at) VALUES ('a', 'x', '2025-01-01 00:00:00')",
        )
        .unwrap();
        let count: Count = diesel::sql_query("SELECT COUNT(*) AS n FROM users")
            .get_result(&mut conn)
            .unwrap();
        assert_eq!(count.n, 1);

        reset_database(&mut conn).expect("reset");
        let count: Count = diesel::sql_query("SELECT COUNT(*) AS n FROM users")
            .get_result(&mut conn)
            .unwrap();
        assert_eq!(count.n, 0);
    }

    #[test]
    fn foreign_keys_are_enforced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fk.db");
        let pool = connect(path.to_str().unwrap(), 1).unwrap();
        let mut conn = pool.get().unwrap();
        run_migrations(&mut conn).unwrap();
        let orphan = conn.batch_execute(
            "INSERT INTO workout_sessions (user_id, start_time) VALUES (999, '2025-01-01 00:00:00')",
        );
        assert!(orphan.is_err());
    }
}
