//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod catalog_unit_of_work;
pub mod item_repository;
pub mod price_repository;
pub mod repository_provider;
pub mod user_repository;

pub use catalog_unit_of_work::SeaOrmCatalogUnitOfWork;
pub use item_repository::SeaOrmItemRepository;
pub use price_repository::SeaOrmPriceRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use user_repository::SeaOrmUserRepository;

use sea_orm::{DbErr, SqlErr};

use crate::domain::DomainError;

/// Unique violations become `Conflict`; everything else is a storage error.
pub(crate) fn db_err(e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => DomainError::Conflict(detail),
        _ => DomainError::Storage(e.to_string()),
    }
}
