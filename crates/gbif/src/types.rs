//! GBIF wire types.

use natura_core::{KINGDOM_KEY_PLANTAE, PlantImage};
use serde::{Deserialize, Serialize};

/// Paginated envelope shared by GBIF search endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub limit: u64,
    #[serde(default)]
    pub end_of_records: bool,
    #[serde(default)]
    pub count: Option<u64>,
}

/// A vernacular-name entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vernacular {
    #[serde(default)]
    pub vernacular_name: String,
    /// ISO 639-2 tag, `eng` for English.
    #[serde(default)]
    pub language: Option<String>,
}

/// An observed organism as returned by `occurrence/search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    #[serde(rename = "gbifID", default)]
    pub gbif_id: Option<String>,
    #[serde(default)]
    pub media: Vec<PlantImage>,
    pub scientific_name: Option<String>,
    pub accepted_scientific_name: Option<String>,
    pub kingdom: Option<String>,
    pub phylum: Option<String>,
    pub order: Option<String>,
    pub family: Option<String>,
    pub genus: Option<String>,
    pub species: Option<String>,
    pub species_key: Option<u64>,
    pub generic_name: Option<String>,
    pub specific_epithet: Option<String>,
}

/// Filters for the seed occurrence query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedFilter {
    /// ISO 3166 country code.
    pub country: String,
    pub media_type: String,
    pub kingdom_key: u32,
}

impl Default for SeedFilter {
    fn default() -> Self {
        Self {
            country: "AU".to_owned(),
            media_type: "StillImage".to_owned(),
            kingdom_key: KINGDOM_KEY_PLANTAE,
        }
    }
}

impl SeedFilter {
    pub(crate) fn query_pairs(&self) -> [(&'static str, String); 3] {
        [
            ("country", self.country.clone()),
            ("mediaType", self.media_type.clone()),
            ("kingdomKey", self.kingdom_key.to_string()),
        ]
    }
}
