pub mod catalog;
pub mod identity;

// Re-export key types for convenience
pub use catalog::{CreateItemRequest, ItemDetails, ItemService, PriceInput, UpdateItemRequest};
pub use identity::UserService;
