//! GBIF client for natura
//!
//! Looks up occurrence images, English vernacular names and seed occurrences
//! from the GBIF API. Image lookups go through a sliding-expiration cache and
//! every request retries transient failures with exponential backoff.

pub mod cache;
pub mod client;
pub mod error;
pub mod retry;
pub mod types;

#[cfg(test)]
mod retry_tests;

pub use cache::ImageCache;
pub use client::GbifClient;
pub use error::GbifError;
pub use retry::RetryPolicy;
pub use types::{Occurrence, QueryResult, SeedFilter, Vernacular};
