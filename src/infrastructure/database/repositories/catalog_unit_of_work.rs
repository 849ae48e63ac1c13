//! SeaORM implementation of CatalogUnitOfWork
//!
//! Runs the item and price writes of one catalog command in a single
//! transaction.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::debug;

use super::db_err;
use super::item_repository::{insert_item, replace_item};
use super::price_repository::{close_and_insert, insert_price};
use crate::domain::{CatalogUnitOfWork, DomainResult, Item, Price};

pub struct SeaOrmCatalogUnitOfWork {
    db: DatabaseConnection,
}

impl SeaOrmCatalogUnitOfWork {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CatalogUnitOfWork for SeaOrmCatalogUnitOfWork {
    async fn create_item_with_price(
        &self,
        item: &Item,
        price: Option<&Price>,
    ) -> DomainResult<Item> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let saved = insert_item(&txn, item).await?;
        if let Some(p) = price {
            insert_price(&txn, p).await?;
        }

        txn.commit().await.map_err(db_err)?;
        debug!(item_id = %saved.item_id(), with_price = price.is_some(), "Catalog create committed");
        Ok(saved)
    }

    async fn update_item_with_price(
        &self,
        item: &Item,
        price: Option<&Price>,
    ) -> DomainResult<Item> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let saved = replace_item(&txn, item).await?;
        if let Some(p) = price {
            close_and_insert(&txn, &item.item_id(), p).await?;
        }

        txn.commit().await.map_err(db_err)?;
        debug!(item_id = %saved.item_id(), with_price = price.is_some(), "Catalog update committed");
        Ok(saved)
    }
}
