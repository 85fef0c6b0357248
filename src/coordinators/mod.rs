// Coordinators - request workflows between the API layer and the stores
pub mod item_coordinator;

pub use item_coordinator::ItemCoordinator;
