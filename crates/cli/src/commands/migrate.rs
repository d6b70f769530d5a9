//! Schema setup without starting the server.

use natura_storage::StorageBackend;

/// Connecting runs the backend's migrations; nothing else to do.
pub(crate) async fn run(database_url: &str) -> anyhow::Result<()> {
    let storage = StorageBackend::connect(database_url).await?;
    tracing::info!(backend = storage.kind(), "migrations applied");
    println!("Migrations applied ({})", storage.kind());
    Ok(())
}
