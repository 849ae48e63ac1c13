//! Validated value objects
//!
//! Every type here is built through a checking constructor; once a value
//! exists it is known to satisfy its invariant.

pub mod identity;
pub mod ids;
pub mod money;
pub mod text;

pub use identity::{Email, Password, PasswordHash, Permission, Role};
pub use ids::{ItemId, PriceId, UserId};
pub use money::{Currency, PriceWithTax, PriceWithoutTax, TaxRate, MAX_PRICE};
pub use text::{Description, ItemName, Stock, MAX_TEXT_LEN};
