//! Service layer for natura
//!
//! Centralizes business logic between the HTTP handlers and the storage,
//! GBIF and identification crates.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short error vars are idiomatic")]

mod collection_service;
mod error;
mod plant_service;

#[cfg(test)]
mod tests;

pub use collection_service::{CollectionService, CollectionView};
pub use error::ServiceError;
pub use plant_service::{ImageSource, PlantService, SeedImport};
