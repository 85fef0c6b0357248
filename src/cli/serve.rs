use std::sync::Arc;

use poem::{Server, listener::TcpListener};

use crate::api::build_routes;
use crate::app_data::AppData;
use crate::config::{BootstrapSettings, DatabaseConnections};

/// Connect, migrate, and serve until the process is stopped
///
/// A database that cannot be reached or migrated is fatal: the error is
/// returned before the listener is bound.
pub async fn run_server(settings: &BootstrapSettings) -> Result<(), Box<dyn std::error::Error>> {
    let connections = DatabaseConnections::connect(settings).await.inspect_err(|e| {
        tracing::error!("Database connection failed: {}", e);
    })?;
    connections.migrate().await.inspect_err(|e| {
        tracing::error!("Database migration failed: {}", e);
    })?;

    let app_data = Arc::new(AppData::init(connections));
    let app = build_routes(app_data, settings.public_url());

    let address = settings.server_address();
    tracing::info!("Starting server on http://{}", address);
    tracing::info!("Swagger UI available at {}/swagger", settings.public_url());

    Server::new(TcpListener::bind(address)).run(app).await?;

    Ok(())
}
