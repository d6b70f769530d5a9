//! Typed error enum for the service layer.
//!
//! Unifies storage, GBIF and identification failures into a single error
//! type so handlers can match on failure modes instead of downcasting.

use natura_gbif::GbifError;
use natura_identify::IdentifyError;
use natura_storage::StorageError;
use thiserror::Error;

/// Service-layer error unifying storage, GBIF and identification failures.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage operation failed (database error, lost insert race).
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// GBIF lookup failed (after retries for transient failures).
    #[error("gbif: {0}")]
    Gbif(#[from] GbifError),

    /// The identification provider failed.
    #[error("identification: {0}")]
    Identify(#[from] IdentifyError),

    /// Caller provided invalid input (empty image, blank name).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A referenced user or plant does not exist.
    #[error("not found: {0}")]
    NotFound(String),
}
