//! Database entities module

pub mod item;
pub mod price;
pub mod user;

pub use item::Entity as Item;
pub use price::Entity as Price;
pub use user::Entity as User;
