pub mod item;
pub mod price;
pub mod repositories;
pub mod user;
pub mod value_objects;

// Re-export commonly used types
pub use item::{Item, ItemRepository};
pub use price::{Price, PriceQuote, PriceRepository};
pub use repositories::{CatalogUnitOfWork, DomainResult, RepositoryProvider};
pub use user::{User, UserRepository};

pub use crate::shared::errors::DomainError;
