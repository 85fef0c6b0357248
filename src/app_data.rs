use std::sync::Arc;

use crate::config::DatabaseConnections;
use crate::stores::ItemStore;

/// Centralized application data following the main-owned stores pattern
///
/// Created once in main.rs, wrapped in `Arc`, and handed to coordinators.
///
/// ```text
/// main.rs
///   ↓
/// AppData::init(connections)
///   └─ item_store (Arc<ItemStore>)
///   ↓ wrapped in Arc<AppData>
///   └─ ItemCoordinator::new(app_data)
/// ```
pub struct AppData {
    pub item_store: Arc<ItemStore>,
}

impl AppData {
    /// Initialize all application data
    ///
    /// Database connections should be established and migrated before calling this.
    pub fn init(connections: DatabaseConnections) -> Self {
        tracing::info!("Initializing AppData...");

        let item_store = Arc::new(ItemStore::new(connections.db));
        tracing::debug!("Item store created");

        Self { item_store }
    }
}
