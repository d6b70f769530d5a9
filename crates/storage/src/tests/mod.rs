//! Test utilities and module declarations for storage tests.

use crate::SqliteStorage;
use natura_core::NewPlant;

pub async fn create_test_storage() -> SqliteStorage {
    SqliteStorage::new("sqlite::memory:").await.unwrap()
}

/// File database in `dir`, pooled the way the server runs it.
pub async fn create_file_storage(dir: &tempfile::TempDir) -> SqliteStorage {
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("natura.db").display());
    SqliteStorage::new(&url).await.unwrap()
}

pub fn new_plant(scientific_name: &str, common_names: &[&str], key: Option<&str>) -> NewPlant {
    NewPlant {
        scientific_name: scientific_name.to_owned(),
        common_names: common_names.iter().map(|s| (*s).to_owned()).collect(),
        gbif_species_key: key.map(str::to_owned),
    }
}

mod collection_tests;
