//! Plant records and the common-name merge rules.
//!
//! A plant is identified by its scientific name. Its common names form an
//! ordered set: insertion order is kept, duplicates (exact, case-sensitive
//! match) are never stored. The only mutation a plant ever sees is appending
//! names it did not have yet.

use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A stored plant with its common names.
///
/// Only built through [`Plant::new`] so the names are always deduplicated.
#[derive(Debug, Clone, Serialize)]
pub struct Plant {
    pub id: String,
    pub scientific_name: String,
    /// GBIF species key, kept as text the way the providers hand it out.
    pub gbif_species_key: Option<String>,
    common_names: Vec<String>,
}

impl Plant {
    /// Builds a plant, dropping repeated common names.
    #[must_use]
    pub fn new(
        id: String,
        scientific_name: String,
        common_names: Vec<String>,
        gbif_species_key: Option<String>,
    ) -> Self {
        Self { id, scientific_name, gbif_species_key, common_names: dedup_names(&common_names) }
    }

    /// Common names in the order they were first seen.
    #[must_use]
    pub fn common_names(&self) -> &[String] {
        &self.common_names
    }

    /// Appends every name from `candidates` the plant does not have yet.
    ///
    /// Returns the names that were actually appended, in append order.
    /// Calling this again with the same list appends nothing.
    pub fn add_missing_common_names(&mut self, candidates: &[String]) -> Vec<String> {
        let missing = missing_common_names(&self.common_names, candidates);
        self.common_names.extend(missing.iter().cloned());
        missing
    }

    /// Names to show for this plant: common names, or the scientific name
    /// when none are known.
    #[must_use]
    pub fn display_names(&self) -> Vec<String> {
        display_names(&self.scientific_name, &self.common_names)
    }
}

impl PartialEq for Plant {
    fn eq(&self, other: &Self) -> bool {
        self.scientific_name == other.scientific_name
    }
}

impl Eq for Plant {}

impl Hash for Plant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.scientific_name.hash(state);
    }
}

/// Normalized output of a photo identification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentifiedPlant {
    pub scientific_name: String,
    pub common_names: Vec<String>,
    pub gbif_id: Option<String>,
}

impl IdentifiedPlant {
    #[must_use]
    pub fn display_names(&self) -> Vec<String> {
        display_names(&self.scientific_name, &self.common_names)
    }
}

impl From<IdentifiedPlant> for NewPlant {
    fn from(plant: IdentifiedPlant) -> Self {
        Self {
            scientific_name: plant.scientific_name,
            common_names: plant.common_names,
            gbif_species_key: plant.gbif_id,
        }
    }
}

/// Input for creating or enriching a plant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPlant {
    pub scientific_name: String,
    pub common_names: Vec<String>,
    pub gbif_species_key: Option<String>,
}

/// Removes repeated names while preserving first-seen order.
#[must_use]
pub fn dedup_names(names: &[String]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(names.len());
    let mut result = Vec::with_capacity(names.len());
    for name in names {
        if seen.insert(name.as_str()) {
            result.push(name.clone());
        }
    }
    result
}

/// Set difference `candidates - existing`, deduplicated, in candidate order.
///
/// Matching is exact and case-sensitive.
#[must_use]
pub fn missing_common_names(existing: &[String], candidates: &[String]) -> Vec<String> {
    let mut seen: HashSet<&str> = existing.iter().map(String::as_str).collect();
    let mut missing = Vec::new();
    for name in candidates {
        if seen.insert(name.as_str()) {
            missing.push(name.clone());
        }
    }
    missing
}

fn display_names(scientific_name: &str, common_names: &[String]) -> Vec<String> {
    if common_names.is_empty() {
        vec![scientific_name.to_owned()]
    } else {
        common_names.to_vec()
    }
}
