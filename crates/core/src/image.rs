//! Image records attached to biodiversity occurrences.

use serde::{Deserialize, Serialize};

/// A media record from a GBIF occurrence.
///
/// GBIF calls the link `identifier`; it is exposed as `url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantImage {
    /// Media type, usually `StillImage`.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(alias = "identifier", default)]
    pub url: String,
    #[serde(default)]
    pub creator: Option<String>,
    #[serde(default)]
    pub publisher: Option<String>,
}

impl PlantImage {
    /// Media entries without a link are useless to a gallery.
    #[must_use]
    pub fn has_url(&self) -> bool {
        !self.url.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_gbif_media_entry() {
        let json = r#"{
            "type": "StillImage",
            "format": "image/jpeg",
            "identifier": "https://inaturalist-open-data.s3.amazonaws.com/photos/1/original.jpg",
            "creator": "Jane Doe",
            "publisher": "iNaturalist"
        }"#;
        let image: PlantImage = serde_json::from_str(json).unwrap();
        assert_eq!(image.kind.as_deref(), Some("StillImage"));
        assert!(image.url.ends_with("original.jpg"));
        assert_eq!(image.creator.as_deref(), Some("Jane Doe"));
        assert!(image.has_url());
    }

    #[test]
    fn missing_identifier_yields_empty_url() {
        let image: PlantImage = serde_json::from_str(r#"{"type": "Sound"}"#).unwrap();
        assert!(!image.has_url());
        assert_eq!(image.publisher, None);
    }
}
