use std::sync::Arc;

use poem::Request;
use poem_openapi::param::{Path, Query};
use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::coordinators::ItemCoordinator;
use crate::errors::{InternalError, ItemApiError};
use crate::stores::ItemQueryParams;
use crate::types::dto::items::{
    CreateItemApiResponse, CreateItemRequest, DeleteItemResponse, ItemResponse, UpdateItemRequest,
};
use crate::types::internal::context::RequestContext;
use crate::types::internal::{Item, ItemDraft, ItemPatch, ItemStatus};

/// Lost & found item endpoints
pub struct ItemsApi {
    item_coordinator: Arc<ItemCoordinator>,
}

impl ItemsApi {
    pub fn new(item_coordinator: Arc<ItemCoordinator>) -> Self {
        Self { item_coordinator }
    }
}

/// API tags for item endpoints
#[derive(Tags)]
enum ItemTags {
    /// Reporting and browsing lost or found items
    Items,
}

fn to_responses(items: Vec<Item>) -> Json<Vec<ItemResponse>> {
    Json(items.into_iter().map(ItemResponse::from).collect())
}

#[OpenApi(prefix_path = "/api")]
impl ItemsApi {
    /// Report a lost or found item
    ///
    /// Validates the payload and returns the stored item with its generated
    /// id and creation time.
    #[oai(path = "/items", method = "post", tag = "ItemTags::Items")]
    async fn create_item(
        &self,
        req: &Request,
        body: Json<CreateItemRequest>,
    ) -> Result<CreateItemApiResponse, ItemApiError> {
        let ctx = RequestContext::from_request(req);
        let draft = ItemDraft::try_from(body.0).map_err(InternalError::from)?;

        let item = self.item_coordinator.create_item(&ctx, draft).await?;

        Ok(CreateItemApiResponse::Created(Json(item.into())))
    }

    /// List items, newest first
    ///
    /// All filters are optional and combined with AND. `search` holds
    /// whitespace-separated terms, any of which may appear (case-insensitive)
    /// in the title or description. `from`/`to` bound the date lost or found
    /// (inclusive). A date without a time means midnight UTC, so `to=2024-01-31`
    /// excludes items dated later on the 31st; pass `2024-01-31T23:59:59Z` to
    /// include the whole day. For `active`, only the exact value `true` selects active items; any
    /// other value selects inactive ones. At most 100 items are returned.
    #[oai(path = "/items", method = "get", tag = "ItemTags::Items")]
    async fn list_items(
        &self,
        req: &Request,
        status: Query<Option<String>>,
        category: Query<Option<String>>,
        search: Query<Option<String>>,
        from: Query<Option<String>>,
        to: Query<Option<String>>,
        active: Query<Option<String>>,
    ) -> Result<Json<Vec<ItemResponse>>, ItemApiError> {
        let ctx = RequestContext::from_request(req);
        let params = ItemQueryParams {
            status: status.0,
            category: category.0,
            search: search.0,
            from: from.0,
            to: to.0,
            active: active.0,
        };

        let items = self.item_coordinator.list_items(&ctx, &params).await?;

        Ok(to_responses(items))
    }

    /// Fetch a single item, active or not
    #[oai(path = "/items/:id", method = "get", tag = "ItemTags::Items")]
    async fn get_item(
        &self,
        req: &Request,
        id: Path<String>,
    ) -> Result<Json<ItemResponse>, ItemApiError> {
        let ctx = RequestContext::from_request(req);
        let item = self.item_coordinator.get_item(&ctx, &id.0).await?;

        Ok(Json(item.into()))
    }

    /// Partially update an item
    ///
    /// Omitted fields are unchanged and `null` clears an optional field. The
    /// merged item must pass the same validation as a new report.
    #[oai(path = "/items/:id", method = "patch", tag = "ItemTags::Items")]
    async fn update_item(
        &self,
        req: &Request,
        id: Path<String>,
        body: Json<UpdateItemRequest>,
    ) -> Result<Json<ItemResponse>, ItemApiError> {
        let ctx = RequestContext::from_request(req);
        let patch = ItemPatch::try_from(body.0).map_err(InternalError::from)?;

        let item = self.item_coordinator.update_item(&ctx, &id.0, patch).await?;

        Ok(Json(item.into()))
    }

    /// Soft delete an item
    ///
    /// The item is kept but marked inactive, so it drops out of the
    /// `lost`/`found` listings.
    #[oai(path = "/items/:id", method = "delete", tag = "ItemTags::Items")]
    async fn delete_item(
        &self,
        req: &Request,
        id: Path<String>,
    ) -> Result<Json<DeleteItemResponse>, ItemApiError> {
        let ctx = RequestContext::from_request(req);
        let item = self.item_coordinator.delete_item(&ctx, &id.0).await?;

        Ok(Json(DeleteItemResponse {
            ok: true,
            item: item.into(),
        }))
    }

    /// Active items reported as lost
    #[oai(path = "/lost", method = "get", tag = "ItemTags::Items")]
    async fn list_lost(&self, req: &Request) -> Result<Json<Vec<ItemResponse>>, ItemApiError> {
        let ctx = RequestContext::from_request(req);
        let items = self
            .item_coordinator
            .list_active_by_status(&ctx, ItemStatus::Lost)
            .await?;

        Ok(to_responses(items))
    }

    /// Active items reported as found
    #[oai(path = "/found", method = "get", tag = "ItemTags::Items")]
    async fn list_found(&self, req: &Request) -> Result<Json<Vec<ItemResponse>>, ItemApiError> {
        let ctx = RequestContext::from_request(req);
        let items = self
            .item_coordinator
            .list_active_by_status(&ctx, ItemStatus::Found)
            .await?;

        Ok(to_responses(items))
    }
}
