//! Integration tests for PgStorage.
//! Run with: DATABASE_URL=... cargo test -p natura-storage --features postgres -- --ignored pg_

#![cfg(feature = "postgres")]

use natura_core::{DEFAULT_USER_ID, NewPlant};
use natura_storage::PgStorage;
use natura_storage::traits::{CollectionStore, PlantStore, UserStore};
use uuid::Uuid;

async fn create_pg_storage() -> PgStorage {
    let url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for PgStorage integration tests");
    PgStorage::new(&url).await.expect("Failed to connect to PostgreSQL")
}

fn unique_species() -> String {
    format!("Testus specius {}", Uuid::new_v4())
}

fn new_plant(scientific_name: &str, common_names: &[&str]) -> NewPlant {
    NewPlant {
        scientific_name: scientific_name.to_owned(),
        common_names: common_names.iter().map(|s| (*s).to_owned()).collect(),
        gbif_species_key: Some("5284517".to_owned()),
    }
}

#[tokio::test]
#[ignore]
async fn pg_upsert_merges_common_names() {
    let storage = create_pg_storage().await;
    let species = unique_species();

    let created = storage.upsert_plant(&new_plant(&species, &["First", "Second"])).await.unwrap();
    assert!(created.created);

    let merged =
        storage.upsert_plant(&new_plant(&species, &["Second", "Third", "Third"])).await.unwrap();
    assert!(!merged.created);
    assert_eq!(merged.added_names, vec!["Third"]);

    let stored = storage.find_plant_by_scientific_name(&species).await.unwrap().unwrap();
    assert_eq!(
        stored.common_names(),
        ["First".to_owned(), "Second".to_owned(), "Third".to_owned()]
    );
}

#[tokio::test]
#[ignore]
async fn pg_collect_is_idempotent() {
    let storage = create_pg_storage().await;
    assert!(storage.get_user(DEFAULT_USER_ID).await.unwrap().is_some());

    let plant = storage.upsert_plant(&new_plant(&unique_species(), &[])).await.unwrap().plant;
    assert!(storage.add_to_collection(DEFAULT_USER_ID, &plant.id).await.unwrap());
    assert!(!storage.add_to_collection(DEFAULT_USER_ID, &plant.id).await.unwrap());

    let collection = storage.get_collection(DEFAULT_USER_ID).await.unwrap();
    assert_eq!(collection.iter().filter(|p| p.id == plant.id).count(), 1);
}
