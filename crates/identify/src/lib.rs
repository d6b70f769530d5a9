//! Plant identification for natura
//!
//! A [`PlantIdentifier`] turns a photo (raw bytes or a remote URL) into a
//! normalized [`IdentifiedPlant`]. [`PlantNetClient`] is the production
//! implementation backed by the Pl@ntNet API.

use async_trait::async_trait;
use natura_core::IdentifiedPlant;

pub mod error;
pub mod plantnet;
pub mod plantnet_types;


pub use error::IdentifyError;
pub use plantnet::PlantNetClient;

/// Recognizes a plant in a photo.
///
/// `Ok(None)` means the provider looked at the image and found no species.
#[async_trait]
pub trait PlantIdentifier: Send + Sync {
    async fn identify_bytes(&self, image: Vec<u8>) -> Result<Option<IdentifiedPlant>, IdentifyError>;

    async fn identify_url(&self, image_url: &str)
    -> Result<Option<IdentifiedPlant>, IdentifyError>;
}
