use std::sync::Arc;

use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::stores::{ItemQuery, ItemQueryParams, ItemStore};
use crate::types::internal::context::RequestContext;
use crate::types::internal::{Item, ItemDraft, ItemPatch, ItemStatus};

/// Item coordinator that orchestrates the lost & found workflows
///
/// Validates input, runs the store operation, and logs the outcome with the
/// request id. Contains no persistence logic of its own.
pub struct ItemCoordinator {
    item_store: Arc<ItemStore>,
}

impl ItemCoordinator {
    /// Create ItemCoordinator from AppData
    pub fn new(app_data: Arc<AppData>) -> Self {
        Self {
            item_store: app_data.item_store.clone(),
        }
    }

    /// Validate and store a new report
    ///
    /// # Errors
    /// * `ItemError::Validation` - a required field is missing, too long, or not an allowed value
    /// * `DatabaseError` - the insert failed
    pub async fn create_item(
        &self,
        ctx: &RequestContext,
        draft: ItemDraft,
    ) -> Result<Item, InternalError> {
        let valid = draft.validate().inspect_err(|e| {
            tracing::debug!(request_id = %ctx.request_id, "Rejected item: {}", e);
        })?;

        let item = self.item_store.insert(valid).await?;

        tracing::info!(
            request_id = %ctx.request_id,
            actor = %ctx.actor_id,
            item_id = %item.id,
            status = %item.status,
            "Item reported"
        );

        Ok(item)
    }

    /// List items matching the raw query-string filters
    ///
    /// # Errors
    /// * `ItemError::InvalidFilter` - `from` or `to` is not a date
    pub async fn list_items(
        &self,
        ctx: &RequestContext,
        params: &ItemQueryParams,
    ) -> Result<Vec<Item>, InternalError> {
        let query = ItemQuery::from_params(params)?;
        let items = self.item_store.list(&query).await?;

        tracing::debug!(request_id = %ctx.request_id, count = items.len(), "Listed items");

        Ok(items)
    }

    /// Active items with one status, newest first
    pub async fn list_active_by_status(
        &self,
        ctx: &RequestContext,
        status: ItemStatus,
    ) -> Result<Vec<Item>, InternalError> {
        let items = self
            .item_store
            .list(&ItemQuery::active_with_status(status))
            .await?;

        tracing::debug!(
            request_id = %ctx.request_id,
            status = %status,
            count = items.len(),
            "Listed active items"
        );

        Ok(items)
    }

    pub async fn get_item(&self, ctx: &RequestContext, id: &str) -> Result<Item, InternalError> {
        let item = self.item_store.find_by_id(id).await?;
        tracing::debug!(request_id = %ctx.request_id, item_id = %id, "Fetched item");
        Ok(item)
    }

    /// Apply a partial update; the merged record must still validate
    pub async fn update_item(
        &self,
        ctx: &RequestContext,
        id: &str,
        patch: ItemPatch,
    ) -> Result<Item, InternalError> {
        let item = self.item_store.update(id, patch).await?;

        tracing::info!(
            request_id = %ctx.request_id,
            actor = %ctx.actor_id,
            item_id = %item.id,
            "Item updated"
        );

        Ok(item)
    }

    /// Soft delete: the record stays but is marked inactive
    pub async fn delete_item(&self, ctx: &RequestContext, id: &str) -> Result<Item, InternalError> {
        let item = self.item_store.soft_delete(id).await?;

        tracing::info!(
            request_id = %ctx.request_id,
            actor = %ctx.actor_id,
            item_id = %item.id,
            "Item deactivated"
        );

        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::internal::{ItemError, ValidationError};
    use crate::test::utils::{draft, setup_test_coordinator};
    use crate::types::internal::FieldPatch;

    fn ctx() -> RequestContext {
        RequestContext::from_request(&poem::Request::builder().finish())
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let coordinator = setup_test_coordinator().await;

        let created = coordinator
            .create_item(&ctx(), draft("Blue Wallet", "wallet", "lost"))
            .await
            .unwrap();
        let fetched = coordinator.get_item(&ctx(), &created.id).await.unwrap();

        assert_eq!(fetched, created);
        assert!(fetched.active);
    }

    #[tokio::test]
    async fn test_create_rejects_missing_contact() {
        let coordinator = setup_test_coordinator().await;
        let mut invalid = draft("Keys", "keys", "found");
        invalid.contact = None;

        let err = coordinator.create_item(&ctx(), invalid).await.unwrap_err();
        assert!(matches!(
            err,
            InternalError::Item(ItemError::Validation(ValidationError::Required {
                field: "contact"
            }))
        ));
    }

    #[tokio::test]
    async fn test_list_items_rejects_bad_date() {
        let coordinator = setup_test_coordinator().await;
        let params = ItemQueryParams {
            from: Some("yesterday".to_string()),
            ..Default::default()
        };

        let err = coordinator.list_items(&ctx(), &params).await.unwrap_err();
        assert!(matches!(
            err,
            InternalError::Item(ItemError::InvalidFilter { .. })
        ));
    }

    #[tokio::test]
    async fn test_list_active_by_status_skips_deleted() {
        let coordinator = setup_test_coordinator().await;
        let kept = coordinator
            .create_item(&ctx(), draft("Umbrella", "other", "found"))
            .await
            .unwrap();
        let removed = coordinator
            .create_item(&ctx(), draft("Scarf", "clothing", "found"))
            .await
            .unwrap();
        coordinator
            .create_item(&ctx(), draft("Phone", "electronics", "lost"))
            .await
            .unwrap();
        coordinator.delete_item(&ctx(), &removed.id).await.unwrap();

        let found = coordinator
            .list_active_by_status(&ctx(), ItemStatus::Found)
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, kept.id);
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_id() {
        let coordinator = setup_test_coordinator().await;

        let update = coordinator
            .update_item(&ctx(), "missing", ItemPatch::default())
            .await
            .unwrap_err();
        let delete = coordinator.delete_item(&ctx(), "missing").await.unwrap_err();

        assert!(matches!(update, InternalError::Item(ItemError::NotFound(_))));
        assert!(matches!(delete, InternalError::Item(ItemError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_item_changes_only_given_fields() {
        let coordinator = setup_test_coordinator().await;
        let created = coordinator
            .create_item(&ctx(), draft("Blue Wallet", "wallet", "lost"))
            .await
            .unwrap();

        let updated = coordinator
            .update_item(
                &ctx(),
                &created.id,
                ItemPatch {
                    status: FieldPatch::Set("found".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.status, ItemStatus::Found);
        assert_eq!(updated.title, created.title);
        assert_eq!(updated.created_at, created.created_at);
    }
}
