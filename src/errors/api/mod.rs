// API-facing error types
pub mod items;

pub use items::ItemApiError;

#[cfg(test)]
mod items_test;
