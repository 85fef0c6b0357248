use sea_orm_migration::prelude::*;

/// Full-text table over the searchable item fields
///
/// The trigram tokenizer indexes every three-character run, so a quoted
/// phrase of three or more characters matches any title or description
/// containing it as a substring, case-insensitively. Triggers keep the table
/// in step with `items`.
const CREATE_STATEMENTS: [&str; 5] = [
    "CREATE VIRTUAL TABLE IF NOT EXISTS items_fts \
     USING fts5(item_id UNINDEXED, title, description, tokenize = 'trigram')",
    "CREATE TRIGGER IF NOT EXISTS items_fts_after_insert AFTER INSERT ON items BEGIN \
     INSERT INTO items_fts (item_id, title, description) VALUES (new.id, new.title, new.description); \
     END",
    "CREATE TRIGGER IF NOT EXISTS items_fts_after_update AFTER UPDATE OF title, description ON items BEGIN \
     DELETE FROM items_fts WHERE item_id = old.id; \
     INSERT INTO items_fts (item_id, title, description) VALUES (new.id, new.title, new.description); \
     END",
    "CREATE TRIGGER IF NOT EXISTS items_fts_after_delete AFTER DELETE ON items BEGIN \
     DELETE FROM items_fts WHERE item_id = old.id; \
     END",
    // Rows written before this migration
    "INSERT INTO items_fts (item_id, title, description) \
     SELECT id, title, description FROM items \
     WHERE id NOT IN (SELECT item_id FROM items_fts)",
];

const DROP_STATEMENTS: [&str; 4] = [
    "DROP TRIGGER IF EXISTS items_fts_after_delete",
    "DROP TRIGGER IF EXISTS items_fts_after_update",
    "DROP TRIGGER IF EXISTS items_fts_after_insert",
    "DROP TABLE IF EXISTS items_fts",
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        for statement in CREATE_STATEMENTS {
            db.execute_unprepared(statement).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        for statement in DROP_STATEMENTS {
            db.execute_unprepared(statement).await?;
        }

        Ok(())
    }
}
