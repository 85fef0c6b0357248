use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use crate::config::BootstrapSettings;
use crate::errors::InternalError;

/// Database handles shared by the application
#[derive(Debug, Clone)]
pub struct DatabaseConnections {
    pub db: DatabaseConnection,
}

impl DatabaseConnections {
    /// Connect to the configured database
    ///
    /// Does NOT run migrations - call [`DatabaseConnections::migrate`] separately.
    pub async fn connect(bootstrap_settings: &BootstrapSettings) -> Result<Self, InternalError> {
        let database_url = bootstrap_settings.database_url();

        let db = Database::connect(database_url)
            .await
            .map_err(|e| InternalError::database("connect_database", e))?;

        tracing::debug!("Connected to database: {}", database_url);

        Ok(Self { db })
    }

    /// Wrap an already-open connection
    pub fn from_connection(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create the items table and its indexes if missing
    pub async fn migrate(&self) -> Result<(), InternalError> {
        migrate_database(&self.db).await
    }
}

/// Run all pending migrations on the provided database connection
///
/// Safe to call on every start; already-applied migrations are skipped and
/// index creation uses `IF NOT EXISTS`.
pub async fn migrate_database(db: &DatabaseConnection) -> Result<(), InternalError> {
    Migrator::up(db, None)
        .await
        .map_err(|e| InternalError::database("run_migrations", e))?;

    tracing::debug!("Database migrations completed");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockEnvironment;
    use sea_orm::{ConnectionTrait, Statement};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_migrate_is_idempotent() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        let connections = DatabaseConnections::from_connection(db);

        connections.migrate().await.unwrap();
        connections.migrate().await.unwrap();

        let rows = connections
            .db
            .query_all(Statement::from_string(
                connections.db.get_database_backend(),
                "SELECT name FROM sqlite_master WHERE type = 'index' AND tbl_name = 'items' AND name LIKE 'idx_items_%'",
            ))
            .await
            .unwrap();
        assert_eq!(rows.len(), 5);

        let search = connections
            .db
            .query_all(Statement::from_string(
                connections.db.get_database_backend(),
                "SELECT name FROM sqlite_master WHERE name LIKE 'items_fts%' AND type IN ('table', 'trigger')",
            ))
            .await
            .unwrap();
        let names: Vec<String> = search
            .iter()
            .map(|row| row.try_get::<String>("", "name").unwrap())
            .collect();
        assert!(names.contains(&"items_fts".to_string()));
        for trigger in ["items_fts_after_insert", "items_fts_after_update", "items_fts_after_delete"] {
            assert!(names.contains(&trigger.to_string()), "missing {}", trigger);
        }
    }

    #[tokio::test]
    async fn test_connect_failure_is_an_error() {
        let env = MockEnvironment::empty()
            .with_var("DATABASE_URL", "sqlite:///missing-dir/lostfound/items.db");
        let settings = BootstrapSettings::from_env_provider(Arc::new(env)).unwrap();

        let result = DatabaseConnections::connect(&settings).await;

        assert!(matches!(result, Err(InternalError::Database(_))));
    }
}
