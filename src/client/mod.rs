//! Client side of the bulletin board
//!
//! Fetches the full item list from a running server, keeps the latest
//! collection in memory, and renders a locally filtered view as HTML.

pub mod board;
pub mod filter;
pub mod http;
pub mod render;

pub use board::{Board, ItemSource};
pub use filter::{CategoryFilter, ItemFilter, filter_items};
pub use http::{ClientError, HttpItemSource};
pub use render::{escape_html, render_item, render_list};
