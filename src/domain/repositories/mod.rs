//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider` - unified access to all per-aggregate repositories
//! - `CatalogUnitOfWork` - item and price writes that must commit together
//! - `DomainResult` - standard result type for domain operations

use async_trait::async_trait;

use super::item::{Item, ItemRepository};
use super::price::{Price, PriceRepository};
use super::user::UserRepository;
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

// ── CatalogUnitOfWork ───────────────────────────────────────────

/// Writes spanning the item and price tables in one transaction.
///
/// Either both rows land or neither does.
#[async_trait]
pub trait CatalogUnitOfWork: Send + Sync {
    /// Insert `item` and, when given, its first price window.
    async fn create_item_with_price(&self, item: &Item, price: Option<&Price>)
        -> DomainResult<Item>;

    /// Replace `item` and, when given, version its price: the open window
    /// is closed and `price` appended. Fails with `NoActivePrice` when a
    /// price is given but the item has no open window.
    async fn update_item_with_price(&self, item: &Item, price: Option<&Price>)
        -> DomainResult<Item>;
}

// ── RepositoryProvider ──────────────────────────────────────────

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let item = repos.items().find_by_id(&item_id).await?;
///     let current = repos.prices().find_current_by_item_id(&item_id).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn items(&self) -> &dyn ItemRepository;
    fn prices(&self) -> &dyn PriceRepository;
    fn users(&self) -> &dyn UserRepository;
    fn catalog(&self) -> &dyn CatalogUnitOfWork;
}
