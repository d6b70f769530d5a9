//! Storage layer for natura
//!
//! Plants, their common names and user collection memberships, stored through
//! sqlx. SQLite is the default backend; PostgreSQL is available behind the
//! `postgres` feature.

mod backend;
pub mod error;
#[cfg(feature = "postgres")]
mod pg_migrations;
#[cfg(feature = "postgres")]
mod pg_storage;
mod rows;
#[cfg(feature = "sqlite")]
mod sqlite;
#[cfg(feature = "sqlite")]
mod sqlite_migrations;
#[cfg(test)]
mod tests;
pub mod traits;

pub use backend::StorageBackend;
pub use error::StorageError;
#[cfg(feature = "postgres")]
pub use pg_storage::PgStorage;
pub use rows::PlantUpsert;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStorage;
