//! Unified storage backend with enum dispatch.

use async_trait::async_trait;
use natura_core::{NewPlant, Plant, User};

use crate::error::StorageError;
use crate::rows::PlantUpsert;
use crate::traits::{CollectionStore, PlantStore, UserStore};

macro_rules! dispatch {
    ($self:expr, $trait:path, $method:ident ( $($arg:expr),* $(,)? )) => {
        match $self {
            #[cfg(feature = "sqlite")]
            StorageBackend::Sqlite(s) => <crate::SqliteStorage as $trait>::$method(s, $($arg),*).await,
            #[cfg(feature = "postgres")]
            StorageBackend::Postgres(s) => <crate::pg_storage::PgStorage as $trait>::$method(s, $($arg),*).await,
        }
    };
}

#[derive(Clone, Debug)]
pub enum StorageBackend {
    #[cfg(feature = "sqlite")]
    Sqlite(crate::SqliteStorage),
    #[cfg(feature = "postgres")]
    Postgres(crate::pg_storage::PgStorage),
}

impl StorageBackend {
    #[cfg(feature = "sqlite")]
    pub async fn new_sqlite(database_url: &str) -> Result<Self, StorageError> {
        Ok(Self::Sqlite(crate::SqliteStorage::new(database_url).await?))
    }

    #[cfg(feature = "postgres")]
    pub async fn new_postgres(database_url: &str) -> Result<Self, StorageError> {
        Ok(Self::Postgres(crate::pg_storage::PgStorage::new(database_url).await?))
    }

    /// Picks the backend from the URL scheme and runs its migrations.
    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        if is_postgres_url(database_url) {
            #[cfg(feature = "postgres")]
            return Self::new_postgres(database_url).await;
            #[cfg(not(feature = "postgres"))]
            return Err(StorageError::Migration(
                "PostgreSQL URL given but natura-storage was built without the `postgres` feature"
                    .to_owned(),
            ));
        }

        #[cfg(feature = "sqlite")]
        return Self::new_sqlite(database_url).await;
        #[cfg(not(feature = "sqlite"))]
        return Err(StorageError::Migration(format!(
            "unsupported database URL (SQLite support not compiled in): {database_url}"
        )));
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            #[cfg(feature = "sqlite")]
            Self::Sqlite(_) => "sqlite",
            #[cfg(feature = "postgres")]
            Self::Postgres(_) => "postgres",
        }
    }
}

fn is_postgres_url(database_url: &str) -> bool {
    database_url.starts_with("postgres://") || database_url.starts_with("postgresql://")
}

// ── PlantStore ───────────────────────────────────────────────────

#[async_trait]
impl PlantStore for StorageBackend {
    async fn get_plant(&self, id: &str) -> Result<Option<Plant>, StorageError> {
        dispatch!(self, PlantStore, get_plant(id))
    }

    async fn find_plant_by_scientific_name(
        &self,
        scientific_name: &str,
    ) -> Result<Option<Plant>, StorageError> {
        dispatch!(self, PlantStore, find_plant_by_scientific_name(scientific_name))
    }

    async fn list_plants(&self) -> Result<Vec<Plant>, StorageError> {
        dispatch!(self, PlantStore, list_plants())
    }

    async fn upsert_plant(&self, input: &NewPlant) -> Result<PlantUpsert, StorageError> {
        dispatch!(self, PlantStore, upsert_plant(input))
    }
}

// ── CollectionStore ──────────────────────────────────────────────

#[async_trait]
impl CollectionStore for StorageBackend {
    async fn add_to_collection(
        &self,
        user_id: &str,
        plant_id: &str,
    ) -> Result<bool, StorageError> {
        dispatch!(self, CollectionStore, add_to_collection(user_id, plant_id))
    }

    async fn get_collection(&self, user_id: &str) -> Result<Vec<Plant>, StorageError> {
        dispatch!(self, CollectionStore, get_collection(user_id))
    }
}

// ── UserStore ────────────────────────────────────────────────────

#[async_trait]
impl UserStore for StorageBackend {
    async fn get_user(&self, id: &str) -> Result<Option<User>, StorageError> {
        dispatch!(self, UserStore, get_user(id))
    }
}
