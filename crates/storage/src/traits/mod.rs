//! Storage backend trait abstraction
//!
//! Async domain traits implemented by every backend and by the
//! `StorageBackend` dispatcher.

pub mod collection;
pub mod plant;
pub mod user;

pub use collection::CollectionStore;
pub use plant::PlantStore;
pub use user::UserStore;
