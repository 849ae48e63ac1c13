//! Item repository interface

use async_trait::async_trait;

use super::model::Item;
use crate::domain::value_objects::ItemId;
use crate::domain::DomainResult;

#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// All live items, ordered by id.
    async fn find_all(&self) -> DomainResult<Vec<Item>>;

    /// Fails with `NotFound` for unknown or deleted items.
    async fn find_by_id(&self, item_id: &ItemId) -> DomainResult<Item>;

    async fn create(&self, item: &Item) -> DomainResult<Item>;

    /// Full replacement of an existing item.
    async fn update(&self, item: &Item) -> DomainResult<Item>;

    /// Soft delete. Price history is left in place.
    async fn delete(&self, item_id: &ItemId) -> DomainResult<()>;
}
