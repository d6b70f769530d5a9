//! PostgreSQL schema migrations for natura storage.

use natura_core::{DEFAULT_USER_EMAIL, DEFAULT_USER_ID};
use sqlx::PgPool;

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY,
        email TEXT,
        user_name TEXT
    )",
    "CREATE TABLE IF NOT EXISTS plants (
        id TEXT PRIMARY KEY,
        scientific_name TEXT NOT NULL,
        gbif_species_key TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )",
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_plants_scientific_name ON plants (scientific_name)",
    "CREATE TABLE IF NOT EXISTS plant_names (
        id TEXT PRIMARY KEY,
        plant_id TEXT NOT NULL REFERENCES plants (id),
        name TEXT NOT NULL,
        position INTEGER NOT NULL,
        UNIQUE (plant_id, name)
    )",
    "CREATE INDEX IF NOT EXISTS idx_plant_names_plant ON plant_names (plant_id, position)",
    "CREATE TABLE IF NOT EXISTS user_plants (
        user_id TEXT NOT NULL REFERENCES users (id),
        plant_id TEXT NOT NULL REFERENCES plants (id),
        collected_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        PRIMARY KEY (user_id, plant_id)
    )",
];

/// Run all PostgreSQL migrations. Idempotent.
pub(crate) async fn run_pg_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }

    sqlx::query(
        "INSERT INTO users (id, email, user_name) VALUES ($1, $2, $3)
         ON CONFLICT (id) DO NOTHING",
    )
    .bind(DEFAULT_USER_ID)
    .bind(DEFAULT_USER_EMAIL)
    .bind(DEFAULT_USER_ID)
    .execute(pool)
    .await?;

    tracing::debug!("PostgreSQL migrations applied");
    Ok(())
}
