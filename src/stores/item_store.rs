use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::stores::item_query::ItemQuery;
use crate::types::db::item::{self, ActiveModel, Entity as Items};
use crate::types::internal::{Item, ItemPatch, ValidItem};

/// ItemStore persists lost & found reports
///
/// Writes only accept a [`ValidItem`], so every stored row has passed the
/// item schema. Records are never physically removed.
pub struct ItemStore {
    db: DatabaseConnection,
}

impl ItemStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert a new item
    ///
    /// Assigns a fresh time-ordered id and the creation timestamp.
    ///
    /// # Returns
    /// * `Ok(Item)` - The stored record
    /// * `Err(InternalError)` - Database error
    pub async fn insert(&self, valid: ValidItem) -> Result<Item, InternalError> {
        let created_at = Utc::now().timestamp_millis();
        let model = ActiveModel {
            id: Set(Uuid::now_v7().to_string()),
            title: Set(valid.title().to_string()),
            description: Set(valid.description().to_string()),
            category: Set(valid.category().as_str().to_string()),
            status: Set(valid.status().as_str().to_string()),
            location: Set(valid.location().map(str::to_string)),
            contact: Set(valid.contact().to_string()),
            date_lost_or_found: Set(valid.date_lost_or_found().map(to_millis)),
            active: Set(valid.active()),
            created_at: Set(created_at),
        };

        let model = model
            .insert(&self.db)
            .await
            .map_err(|e| InternalError::database("insert_item", e))?;

        Item::try_from(model)
    }

    /// Get an item by id, whether or not it is active
    ///
    /// # Returns
    /// * `Ok(Item)` - The record
    /// * `Err(InternalError::Item(ItemError::NotFound))` - No such id
    pub async fn find_by_id(&self, id: &str) -> Result<Item, InternalError> {
        let model = Self::find_model(&self.db, id).await?;
        Item::try_from(model)
    }

    /// Run a list query; results are newest first and capped
    pub async fn list(&self, query: &ItemQuery) -> Result<Vec<Item>, InternalError> {
        query
            .select()
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_items", e))?
            .into_iter()
            .map(Item::try_from)
            .collect()
    }

    /// Apply a partial update
    ///
    /// The patch is overlaid on the current record and the merged result is
    /// validated with the create rules. Read, merge and write happen in one
    /// transaction; on a validation error nothing is written.
    pub async fn update(&self, id: &str, patch: ItemPatch) -> Result<Item, InternalError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(InternalError::transaction_begin)?;

        let model = Self::find_model(&txn, id).await?;
        let current = Item::try_from(model.clone())?;
        let valid = patch.apply_to(current.to_draft()).validate()?;

        let mut active_model: ActiveModel = model.into();
        active_model.title = Set(valid.title().to_string());
        active_model.description = Set(valid.description().to_string());
        active_model.category = Set(valid.category().as_str().to_string());
        active_model.status = Set(valid.status().as_str().to_string());
        active_model.location = Set(valid.location().map(str::to_string));
        active_model.contact = Set(valid.contact().to_string());
        active_model.date_lost_or_found = Set(valid.date_lost_or_found().map(to_millis));
        active_model.active = Set(valid.active());

        let updated = active_model
            .update(&txn)
            .await
            .map_err(|e| InternalError::database("update_item", e))?;

        txn.commit()
            .await
            .map_err(InternalError::transaction_commit)?;

        Item::try_from(updated)
    }

    /// Mark an item inactive; no other field changes
    ///
    /// Idempotent: deleting an inactive item succeeds and leaves it inactive.
    pub async fn soft_delete(&self, id: &str) -> Result<Item, InternalError> {
        let model = Self::find_model(&self.db, id).await?;

        let mut active_model: ActiveModel = model.into();
        active_model.active = Set(false);

        let updated = active_model
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("soft_delete_item", e))?;

        Item::try_from(updated)
    }

    async fn find_model(conn: &impl ConnectionTrait, id: &str) -> Result<item::Model, InternalError> {
        Items::find_by_id(id.to_string())
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_item", e))?
            .ok_or_else(|| InternalError::not_found(id))
    }
}

fn to_millis(timestamp: DateTime<Utc>) -> i64 {
    timestamp.timestamp_millis()
}

impl std::fmt::Debug for ItemStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemStore")
            .field("db", &"<connection>")
            .finish()
    }
}
