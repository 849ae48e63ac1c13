//! Price aggregate
//!
//! Contains the Price entity, the PriceQuote value, and the temporal
//! repository interface.

pub mod model;
pub mod repository;

pub use model::{Price, PriceQuote};
pub use repository::PriceRepository;
