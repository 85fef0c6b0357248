use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::client::filter::{ItemFilter, filter_items};
use crate::client::http::ClientError;
use crate::client::render::render_list;
use crate::types::dto::items::{CreateItemRequest, ItemResponse};

/// Where the board gets its items from
#[async_trait]
pub trait ItemSource: Send + Sync {
    /// The unfiltered collection, newest first
    async fn fetch_items(&self) -> Result<Vec<ItemResponse>, ClientError>;

    async fn create_item(&self, request: &CreateItemRequest) -> Result<ItemResponse, ClientError>;

    async fn delete_item(&self, id: &str) -> Result<(), ClientError>;
}

#[derive(Debug, Default)]
struct Cache {
    items: Vec<ItemResponse>,
    /// Ticket of the fetch whose result `items` holds
    applied: u64,
}

/// In-memory bulletin board over an [`ItemSource`]
///
/// Every fetch takes a ticket from a monotonically increasing counter. A
/// finished fetch only replaces the cache when no newer fetch has been
/// applied, so a slow response cannot overwrite a fresher one.
pub struct Board<S> {
    source: S,
    cache: Mutex<Cache>,
    generation: AtomicU64,
}

impl<S: ItemSource> Board<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: Mutex::new(Cache::default()),
            generation: AtomicU64::new(0),
        }
    }

    /// Reserve the ticket for a new fetch
    pub fn begin_fetch(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Store a fetch result unless a newer one is already applied
    ///
    /// Returns whether the cache was replaced.
    pub fn apply_fetch(&self, ticket: u64, items: Vec<ItemResponse>) -> bool {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if ticket <= cache.applied {
            tracing::debug!(ticket, applied = cache.applied, "Discarding stale fetch");
            return false;
        }

        cache.items = items;
        cache.applied = ticket;
        true
    }

    /// Re-fetch the entire collection
    pub async fn refresh(&self) -> Result<bool, ClientError> {
        let ticket = self.begin_fetch();
        let items = self.source.fetch_items().await?;
        Ok(self.apply_fetch(ticket, items))
    }

    /// Snapshot of the cached collection
    pub fn items(&self) -> Vec<ItemResponse> {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .items
            .clone()
    }

    pub fn view(&self, filter: &ItemFilter) -> Vec<ItemResponse> {
        let cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        filter_items(&cache.items, filter)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn render(&self, filter: &ItemFilter) -> String {
        let cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        render_list(&filter_items(&cache.items, filter))
    }

    /// Submit a new report, then re-fetch
    ///
    /// Title, category, description and contact must be non-blank; nothing
    /// is sent otherwise. Text fields are trimmed before sending.
    pub async fn submit(&self, request: CreateItemRequest) -> Result<ItemResponse, ClientError> {
        let request = trimmed(request);

        let missing: Vec<&'static str> = [
            ("title", &request.title),
            ("category", &request.category),
            ("description", &request.description),
            ("contact", &request.contact),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().is_none_or(str::is_empty))
        .map(|(name, _)| name)
        .collect();

        if !missing.is_empty() {
            return Err(ClientError::MissingFields { missing });
        }

        let created = self.source.create_item(&request).await?;
        self.refresh().await?;

        Ok(created)
    }

    /// Delete an item, then re-fetch
    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        self.source.delete_item(id).await?;
        self.refresh().await?;
        Ok(())
    }
}

fn trimmed(request: CreateItemRequest) -> CreateItemRequest {
    let trim = |value: Option<String>| value.map(|v| v.trim().to_string());
    CreateItemRequest {
        title: trim(request.title),
        description: trim(request.description),
        category: trim(request.category),
        status: trim(request.status),
        location: trim(request.location).filter(|v| !v.is_empty()),
        contact: trim(request.contact),
        date_lost_or_found: trim(request.date_lost_or_found),
    }
}
