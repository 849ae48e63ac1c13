//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::repositories::{CatalogUnitOfWork, RepositoryProvider};
use crate::domain::{ItemRepository, PriceRepository, UserRepository};

use super::catalog_unit_of_work::SeaOrmCatalogUnitOfWork;
use super::item_repository::SeaOrmItemRepository;
use super::price_repository::SeaOrmPriceRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let item = repos.items().find_by_id(&item_id).await?;
/// let history = repos.prices().find_by_item_id(&item_id).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    items: SeaOrmItemRepository,
    prices: SeaOrmPriceRepository,
    users: SeaOrmUserRepository,
    catalog: SeaOrmCatalogUnitOfWork,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            items: SeaOrmItemRepository::new(db.clone()),
            prices: SeaOrmPriceRepository::new(db.clone()),
            users: SeaOrmUserRepository::new(db.clone()),
            catalog: SeaOrmCatalogUnitOfWork::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn items(&self) -> &dyn ItemRepository {
        &self.items
    }

    fn prices(&self) -> &dyn PriceRepository {
        &self.prices
    }

    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn catalog(&self) -> &dyn CatalogUnitOfWork {
        &self.catalog
    }
}
