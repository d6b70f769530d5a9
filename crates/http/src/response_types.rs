//! Response types (Serialize)

use std::collections::HashMap;

use natura_core::{Plant, PlantImage};
use natura_service::CollectionView;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct PlantResponse {
    pub id: String,
    pub scientific_name: String,
    pub common_names: Vec<String>,
    pub display_names: Vec<String>,
    pub gbif_species_key: Option<String>,
    pub image: Option<PlantImage>,
}

impl PlantResponse {
    fn new(plant: Plant, images: &HashMap<String, PlantImage>) -> Self {
        Self {
            image: images.get(&plant.scientific_name).cloned(),
            display_names: plant.display_names(),
            common_names: plant.common_names().to_vec(),
            id: plant.id,
            scientific_name: plant.scientific_name,
            gbif_species_key: plant.gbif_species_key,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CollectionResponse {
    pub user_id: String,
    pub collected: Vec<PlantResponse>,
    pub plants: Vec<PlantResponse>,
}

impl CollectionResponse {
    pub fn from_view(user_id: String, view: CollectionView) -> Self {
        let CollectionView { collected, all_plants, images } = view;
        Self {
            user_id,
            collected: collected.into_iter().map(|p| PlantResponse::new(p, &images)).collect(),
            plants: all_plants.into_iter().map(|p| PlantResponse::new(p, &images)).collect(),
        }
    }
}
