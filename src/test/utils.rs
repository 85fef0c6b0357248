// Test utilities shared across unit tests
// Only compiled when running tests

use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use crate::app_data::AppData;
use crate::config::DatabaseConnections;
use crate::coordinators::ItemCoordinator;
use crate::stores::ItemStore;
use crate::types::internal::ItemDraft;

/// Creates an in-memory database with migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

pub async fn setup_test_store() -> ItemStore {
    ItemStore::new(setup_test_db().await)
}

pub async fn setup_test_app_data() -> Arc<AppData> {
    let connections = DatabaseConnections::from_connection(setup_test_db().await);
    Arc::new(AppData::init(connections))
}

pub async fn setup_test_coordinator() -> ItemCoordinator {
    ItemCoordinator::new(setup_test_app_data().await)
}

/// A draft that passes validation
pub fn draft(title: &str, category: &str, status: &str) -> ItemDraft {
    ItemDraft {
        title: Some(title.to_string()),
        description: Some(format!("{} description", title)),
        category: Some(category.to_string()),
        status: Some(status.to_string()),
        location: None,
        contact: Some("reporter@example.com".to_string()),
        date_lost_or_found: None,
        active: None,
    }
}
