//! Row assembly shared by the SQLite and PostgreSQL backends.

use std::collections::HashMap;

use natura_core::Plant;

/// Result of a merge-on-insert.
#[derive(Debug, Clone)]
pub struct PlantUpsert {
    /// The plant as stored after the merge.
    pub plant: Plant,
    /// `true` when no plant with this scientific name existed before.
    pub created: bool,
    /// Common names written by this call (all names for a new plant).
    pub added_names: Vec<String>,
}

/// `(id, scientific_name, gbif_species_key)` as selected from `plants`.
pub(crate) type PlantRow = (String, String, Option<String>);

/// `(plant_id, name)` as selected from `plant_names`, ordered by position.
pub(crate) type NameRow = (String, String);

pub(crate) const PLANT_COLUMNS: &str = "p.id, p.scientific_name, p.gbif_species_key";

/// Joins plant rows with their name rows, keeping plant order and name order.
pub(crate) fn assemble_plants(plants: Vec<PlantRow>, names: Vec<NameRow>) -> Vec<Plant> {
    let mut names_by_plant: HashMap<String, Vec<String>> = HashMap::new();
    for (plant_id, name) in names {
        names_by_plant.entry(plant_id).or_default().push(name);
    }
    plants
        .into_iter()
        .map(|(id, scientific_name, key)| {
            let common_names = names_by_plant.remove(&id).unwrap_or_default();
            Plant::new(id, scientific_name, common_names, key)
        })
        .collect()
}
