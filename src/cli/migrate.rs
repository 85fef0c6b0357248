use crate::config::{BootstrapSettings, DatabaseConnections};
use crate::errors::InternalError;

/// Connect to the configured database and run all pending migrations
///
/// Does not build the full AppData.
pub async fn run_migrations(settings: &BootstrapSettings) -> Result<(), InternalError> {
    tracing::info!("Running database migrations...");

    let connections = DatabaseConnections::connect(settings).await?;
    connections.migrate().await?;

    tracing::info!("All migrations completed successfully");

    Ok(())
}
