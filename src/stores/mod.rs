pub mod item_query;
pub mod item_store;

pub use item_query::{ItemQuery, ItemQueryParams, MAX_RESULTS};
pub use item_store::ItemStore;
