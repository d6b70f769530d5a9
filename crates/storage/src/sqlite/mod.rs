//! SQLite storage backend using sqlx.
//!
//! Split into modular files by domain concern.

mod collection;
mod plants;
mod users;

use std::str::FromStr;

use natura_core::{Plant, SQLITE_POOL_MAX_CONNECTIONS};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

use crate::error::StorageError;
use crate::rows::{NameRow, PlantRow, assemble_plants};
use crate::sqlite_migrations::run_sqlite_migrations;

#[derive(Clone, Debug)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Opens (creating if needed) the database at `database_url` and migrates it.
    ///
    /// `sqlite::memory:` gets a single long-lived connection so every query
    /// sees the same database. File databases run in WAL mode so readers do
    /// not block the writer.
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let options =
            SqliteConnectOptions::from_str(database_url)?.create_if_missing(true).foreign_keys(true);

        let (options, pool_options) = if database_url.contains(":memory:") {
            let pool =
                SqlitePoolOptions::new().max_connections(1).idle_timeout(None).max_lifetime(None);
            (options, pool)
        } else {
            let pool = SqlitePoolOptions::new().max_connections(SQLITE_POOL_MAX_CONNECTIONS);
            (options.journal_mode(SqliteJournalMode::Wal), pool)
        };

        let pool = pool_options.connect_with(options).await?;
        run_sqlite_migrations(&pool).await.map_err(|e| StorageError::Migration(e.to_string()))?;
        tracing::info!("SqliteStorage initialized");
        Ok(Self { pool })
    }

    /// Runs a plants query and its matching names query, binding the same
    /// optional filter to both, and joins the results.
    async fn fetch_plants(
        &self,
        plants_sql: &str,
        names_sql: &str,
        filter: Option<&str>,
    ) -> Result<Vec<Plant>, StorageError> {
        let mut plants_query = sqlx::query_as::<_, PlantRow>(plants_sql);
        let mut names_query = sqlx::query_as::<_, NameRow>(names_sql);
        if let Some(value) = filter {
            plants_query = plants_query.bind(value);
            names_query = names_query.bind(value);
        }
        let plants = plants_query.fetch_all(&self.pool).await?;
        let names = names_query.fetch_all(&self.pool).await?;
        Ok(assemble_plants(plants, names))
    }
}
