//! Presenters - JSON shapes of domain objects

pub mod item;
pub mod price;
pub mod user;

pub use item::ItemResponse;
pub use price::PriceResponse;
pub use user::UserResponse;
