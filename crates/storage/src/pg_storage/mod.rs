//! PostgreSQL storage backend using sqlx.
//!
//! Split into modular files by domain concern.

mod collection;
mod plants;
mod users;

use natura_core::{
    PG_POOL_ACQUIRE_TIMEOUT_SECS, PG_POOL_IDLE_TIMEOUT_SECS, PG_POOL_MAX_CONNECTIONS, Plant,
};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::error::StorageError;
use crate::rows::{NameRow, PlantRow, assemble_plants};

use super::pg_migrations::run_pg_migrations;

#[derive(Clone, Debug)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(PG_POOL_MAX_CONNECTIONS)
            .acquire_timeout(std::time::Duration::from_secs(PG_POOL_ACQUIRE_TIMEOUT_SECS))
            .idle_timeout(std::time::Duration::from_secs(PG_POOL_IDLE_TIMEOUT_SECS))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;
        run_pg_migrations(&pool).await.map_err(|e| StorageError::Migration(e.to_string()))?;
        tracing::info!("PgStorage initialized");
        Ok(Self { pool })
    }

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
