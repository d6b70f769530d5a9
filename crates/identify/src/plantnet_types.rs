//! Pl@ntNet wire types.

use serde::{Deserialize, Deserializer};

/// Body of `GET/POST /v2/identify/{project}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentificationResponse {
    #[serde(default)]
    pub results: Vec<Candidate>,
    #[serde(default)]
    pub best_match: Option<String>,
    #[serde(default)]
    pub remaining_identification_requests: Option<u64>,
}

/// One ranked guess.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub species: Option<Species>,
    #[serde(default)]
    pub gbif: Option<GbifRef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Species {
    #[serde(default)]
    pub scientific_name_without_author: String,
    #[serde(default)]
    pub scientific_name: Option<String>,
    #[serde(default)]
    pub common_names: Vec<String>,
}

/// Link to the matching GBIF taxon.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GbifRef {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
}

/// Pl@ntNet has served the GBIF id both as a string and as a number.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.and_then(|raw| match raw {
        Raw::Text(text) if text.trim().is_empty() => None,
        Raw::Text(text) => Some(text.trim().to_owned()),
        Raw::Number(n) => Some(n.to_string()),
    }))
}
