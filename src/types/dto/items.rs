use chrono::{DateTime, Utc};
use poem_openapi::types::MaybeUndefined;
use poem_openapi::{ApiResponse, Object, payload::Json};
use serde::{Deserialize, Serialize};

use crate::errors::internal::ValidationError;
use crate::types::internal::{FieldPatch, Item, ItemDraft, ItemPatch, parse_timestamp};

/// Request model for reporting a lost or found item
///
/// Every field is optional on the wire so that a missing field is reported
/// as a validation error with a readable message.
#[derive(Object, Debug, Clone, Default, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    /// Short title (required, at most 140 characters)
    pub title: Option<String>,

    /// Free-text description (required, at most 2000 characters)
    pub description: Option<String>,

    /// Item category, e.g. `wallet` or `keys` (required)
    pub category: Option<String>,

    /// `lost` or `found` (required)
    pub status: Option<String>,

    /// Where the item was lost or found
    pub location: Option<String>,

    /// How to reach the reporter (required)
    pub contact: Option<String>,

    /// When the item was lost or found (RFC 3339 or `YYYY-MM-DD`)
    pub date_lost_or_found: Option<String>,
}

/// Request model for a partial update
///
/// Omitted fields are left unchanged; `null` clears an optional field.
#[derive(Object, Debug, Clone, Default)]
#[oai(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    pub title: MaybeUndefined<String>,
    pub description: MaybeUndefined<String>,
    pub category: MaybeUndefined<String>,
    pub status: MaybeUndefined<String>,
    pub location: MaybeUndefined<String>,
    pub contact: MaybeUndefined<String>,
    pub date_lost_or_found: MaybeUndefined<String>,
    pub active: MaybeUndefined<bool>,
}

/// Response model representing a stored item
#[derive(Object, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    /// Unique identifier for the item
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: String,
    pub location: Option<String>,
    pub contact: String,
    pub date_lost_or_found: Option<DateTime<Utc>>,

    /// False once the item has been deleted
    pub active: bool,

    /// Timestamp when the item was reported
    pub created_at: DateTime<Utc>,
}

/// Response model for a soft delete
#[derive(Object, Debug, Clone, Serialize, Deserialize)]
pub struct DeleteItemResponse {
    pub ok: bool,
    pub item: ItemResponse,
}

#[derive(ApiResponse)]
pub enum CreateItemApiResponse {
    /// Item stored
    #[oai(status = 201)]
    Created(Json<ItemResponse>),
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            title: item.title,
            description: item.description,
            category: item.category.as_str().to_string(),
            status: item.status.as_str().to_string(),
            location: item.location,
            contact: item.contact,
            date_lost_or_found: item.date_lost_or_found,
            active: item.active,
            created_at: item.created_at,
        }
    }
}

fn parse_date_field(value: &str) -> Result<DateTime<Utc>, ValidationError> {
    parse_timestamp(value).ok_or_else(|| ValidationError::InvalidDate {
        field: "dateLostOrFound",
        value: value.to_string(),
    })
}

impl TryFrom<CreateItemRequest> for ItemDraft {
    type Error = ValidationError;

    fn try_from(request: CreateItemRequest) -> Result<Self, Self::Error> {
        let date_lost_or_found = match request.date_lost_or_found.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(value) => Some(parse_date_field(value)?),
        };

        Ok(ItemDraft {
            title: request.title,
            description: request.description,
            category: request.category,
            status: request.status,
            location: request.location,
            contact: request.contact,
            date_lost_or_found,
            active: None,
        })
    }
}

fn field_patch<T>(value: MaybeUndefined<T>) -> FieldPatch<T> {
    match value {
        MaybeUndefined::Undefined => FieldPatch::Unchanged,
        MaybeUndefined::Null => FieldPatch::Clear,
        MaybeUndefined::Value(value) => FieldPatch::Set(value),
    }
}

impl TryFrom<UpdateItemRequest> for ItemPatch {
    type Error = ValidationError;

    fn try_from(request: UpdateItemRequest) -> Result<Self, Self::Error> {
        let date_lost_or_found = match field_patch(request.date_lost_or_found) {
            FieldPatch::Set(value) if value.trim().is_empty() => FieldPatch::Clear,
            FieldPatch::Set(value) => FieldPatch::Set(parse_date_field(&value)?),
            FieldPatch::Clear => FieldPatch::Clear,
            FieldPatch::Unchanged => FieldPatch::Unchanged,
        };

        Ok(ItemPatch {
            title: field_patch(request.title),
            description: field_patch(request.description),
            category: field_patch(request.category),
            status: field_patch(request.status),
            location: field_patch(request.location),
            contact: field_patch(request.contact),
            date_lost_or_found,
            active: field_patch(request.active),
        })
    }
}
