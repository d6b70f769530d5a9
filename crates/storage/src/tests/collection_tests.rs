use natura_core::DEFAULT_USER_ID;

use super::{create_test_storage, new_plant};
use crate::traits::{CollectionStore, PlantStore, UserStore};

#[tokio::test]
async fn default_user_is_seeded() {
    let storage = create_test_storage().await;
    let user = storage.get_user(DEFAULT_USER_ID).await.unwrap().unwrap();
    assert_eq!(user.email.as_deref(), Some("natura@natura.com"));
    assert!(storage.get_user("someone-else").await.unwrap().is_none());
}

#[tokio::test]
async fn collecting_twice_keeps_one_membership() {
    let storage = create_test_storage().await;
    let plant = storage
        .upsert_plant(&new_plant("Telopea speciosissima", &["Waratah"], None))
        .await
        .unwrap()
        .plant;

    assert!(storage.add_to_collection(DEFAULT_USER_ID, &plant.id).await.unwrap());
    assert!(!storage.add_to_collection(DEFAULT_USER_ID, &plant.id).await.unwrap());

    let collection = storage.get_collection(DEFAULT_USER_ID).await.unwrap();
    assert_eq!(collection.len(), 1);
    assert_eq!(collection[0].scientific_name, "Telopea speciosissima");
    assert_eq!(collection[0].common_names(), ["Waratah".to_owned()]);
}

#[tokio::test]
async fn collection_only_contains_collected_plants() {
    let storage = create_test_storage().await;
    let collected =
        storage.upsert_plant(&new_plant("Banksia serrata", &["Saw Banksia"], None)).await.unwrap();
    storage.upsert_plant(&new_plant("Acacia dealbata", &["Silver Wattle"], None)).await.unwrap();

    storage.add_to_collection(DEFAULT_USER_ID, &collected.plant.id).await.unwrap();

    let collection = storage.get_collection(DEFAULT_USER_ID).await.unwrap();
    assert_eq!(collection.len(), 1);
    assert_eq!(collection[0], collected.plant);
    assert_eq!(storage.list_plants().await.unwrap().len(), 2);
}

#[tokio::test]
async fn collecting_for_unknown_user_fails() {
    let storage = create_test_storage().await;
    let plant = storage.upsert_plant(&new_plant("Banksia serrata", &[], None)).await.unwrap().plant;

    let result = storage.add_to_collection("ghost", &plant.id).await;
    assert!(result.is_err());
}
