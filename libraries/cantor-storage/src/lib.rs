//! Cantor Storage
//!
//! `SQLite` implementation of the `DocumentStore` contract, plus an
//! in-memory implementation for tests and offline use.
//!
//! The schema follows the document-store model the application was designed
//! against: setlist song order lives in a single JSON array column that is
//! only ever replaced whole (union-append and value-removal are expressed
//! as read-modify-write on that array inside a transaction).
//!
//! # Example
//!
//! ```rust,no_run
//! use cantor_storage::{create_pool, run_migrations, SqliteStore};
//! use cantor_core::DocumentStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://cantor.db").await?;
//! run_migrations(&pool).await?;
//!
//! let store = SqliteStore::new(pool);
//! let songs = store.list_songs().await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod memory;
mod store;

pub use error::StorageError;
pub use memory::MemoryStore;
pub use store::SqliteStore;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

/// Create a new `SQLite` pool
///
/// # Errors
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Run database migrations
///
/// Migrations are embedded into the binary for reliability across execution
/// contexts; statements are idempotent so re-running is safe.
///
/// # Errors
/// Returns an error if any migration statement fails
pub async fn run_migrations(pool: &SqlitePool) -> error::Result<()> {
    const MIGRATIONS: &[&str] = &[
        include_str!("../migrations/20250601000001_create_users.sql"),
        include_str!("../migrations/20250601000002_create_songs.sql"),
        include_str!("../migrations/20250601000003_create_setlists.sql"),
    ];

    for migration in MIGRATIONS {
        // Each file may hold several statements; strip comment lines and
        // execute statements one by one, since SQLite runs a single
        // statement per prepared query.
        let sql: String = migration
            .lines()
            .filter(|line| !line.trim_start().starts_with("--"))
            .collect::<Vec<_>>()
            .join("\n");

        for statement in sql.split(';') {
            let statement = statement.trim();
            if statement.is_empty() {
                continue;
            }
            sqlx::query(statement)
                .execute(pool)
                .await
                .map_err(|e| StorageError::Migration(e.to_string()))?;
        }
    }

    tracing::debug!("migrations applied");
    Ok(())
}
