//! Price repository interface
//!
//! Persistence of price windows. Implementations keep at most one open
//! window (`end_date IS NULL`) per item.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::Price;
use crate::domain::value_objects::{ItemId, PriceId};
use crate::domain::DomainResult;

#[async_trait]
pub trait PriceRepository: Send + Sync {
    async fn create(&self, price: &Price) -> DomainResult<Price>;

    /// Fails with `NotFound` when no row has this id.
    async fn find_by_id(&self, price_id: &PriceId) -> DomainResult<Price>;

    /// Full history of an item, newest `start_date` first.
    async fn find_by_item_id(&self, item_id: &ItemId) -> DomainResult<Vec<Price>>;

    /// The window covering the current instant, if any.
    async fn find_current_by_item_id(&self, item_id: &ItemId) -> DomainResult<Option<Price>>;

    /// The window covering `at`, if any. Newest `start_date` wins.
    async fn find_effective_at(
        &self,
        item_id: &ItemId,
        at: DateTime<Utc>,
    ) -> DomainResult<Option<Price>>;

    /// Close every open window of the item and insert `price`, atomically.
    ///
    /// Fails with `NoActivePrice` (and inserts nothing) when the item has
    /// no open window.
    async fn update_by_item_id(&self, item_id: &ItemId, price: &Price) -> DomainResult<Price>;

    /// Idempotent: deleting a missing row succeeds.
    async fn delete(&self, price_id: &PriceId) -> DomainResult<()>;
}
