//! Catalog module - items and their price history
//!
//! Contains the `ItemService` and the raw request types it accepts.

pub mod request;
pub mod service;

pub use request::{CreateItemRequest, PriceInput, UpdateItemRequest};
pub use service::{ItemDetails, ItemService};
