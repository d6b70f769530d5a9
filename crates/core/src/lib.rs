//! Core types for natura
//!
//! Domain types shared across all other crates: plants and their common
//! names, image records, users, and the merge rules that keep common names
//! a set.

pub mod constants;
mod env_config;
mod image;
mod plant;
mod user;

pub use constants::*;
pub use env_config::env_parse_with_default;
pub use image::PlantImage;
pub use plant::{IdentifiedPlant, NewPlant, Plant, dedup_names, missing_common_names};
pub use user::User;
