// Internal types - not exposed over the wire
pub mod context;
pub mod item;

pub use context::{RequestContext, RequestId};
pub use item::{
    FieldPatch, Item, ItemCategory, ItemDraft, ItemPatch, ItemStatus, ValidItem, parse_timestamp,
};
