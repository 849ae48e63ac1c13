//! SeaORM implementation of ItemRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::{debug, info};

use super::db_err;
use crate::domain::value_objects::{Description, ItemId, ItemName, Stock, UserId};
use crate::domain::{DomainError, DomainResult, Item, ItemRepository};
use crate::infrastructure::database::entities::item;

// ── Conversion helpers ──────────────────────────────────────────

fn entity_to_domain(m: item::Model) -> DomainResult<Item> {
    Ok(Item::restore(
        ItemId::new(&m.item_id)?,
        UserId::new(&m.user_id)?,
        ItemName::new(m.item_name)?,
        Stock::new(m.stock),
        Description::new(m.description)?,
        m.created_at,
        m.updated_at,
    ))
}

fn not_found(item_id: &ItemId) -> DomainError {
    DomainError::not_found("Item", "item_id", item_id.value())
}

// ── Connection-generic operations ───────────────────────────────
//
// Shared with the catalog unit of work, which runs them inside a
// transaction.

pub(super) async fn insert_item<C: ConnectionTrait>(conn: &C, item: &Item) -> DomainResult<Item> {
    let model = item::ActiveModel {
        item_id: Set(item.item_id().value()),
        user_id: Set(item.user_id().value()),
        item_name: Set(item.item_name().to_string()),
        stock: Set(item.stock()),
        description: Set(item.description().to_string()),
        created_at: Set(item.created_at()),
        updated_at: Set(item.updated_at()),
        deleted_at: Set(None),
    };
    let saved = model.insert(conn).await.map_err(db_err)?;
    info!(item_id = %saved.item_id, user_id = %saved.user_id, "Item created");
    entity_to_domain(saved)
}

/// Full replacement of the mutable columns of a live item.
pub(super) async fn replace_item<C: ConnectionTrait>(conn: &C, item: &Item) -> DomainResult<Item> {
    let result = item::Entity::update_many()
        .col_expr(item::Column::ItemName, Expr::value(item.item_name()))
        .col_expr(item::Column::Stock, Expr::value(item.stock()))
        .col_expr(item::Column::Description, Expr::value(item.description()))
        .col_expr(item::Column::UpdatedAt, Expr::value(item.updated_at()))
        .filter(item::Column::ItemId.eq(item.item_id().value()))
        .filter(item::Column::DeletedAt.is_null())
        .exec(conn)
        .await
        .map_err(db_err)?;

    if result.rows_affected == 0 {
        return Err(not_found(&item.item_id()));
    }
    info!(item_id = %item.item_id(), "Item updated");
    Ok(item.clone())
}

// ── SeaOrmItemRepository ────────────────────────────────────────

pub struct SeaOrmItemRepository {
    db: DatabaseConnection,
}

impl SeaOrmItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ItemRepository for SeaOrmItemRepository {
    async fn find_all(&self) -> DomainResult<Vec<Item>> {
        let models = item::Entity::find()
            .filter(item::Column::DeletedAt.is_null())
            .order_by_asc(item::Column::ItemId)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        debug!(count = models.len(), "Loaded items");
        models.into_iter().map(entity_to_domain).collect()
    }

    async fn find_by_id(&self, item_id: &ItemId) -> DomainResult<Item> {
        let model = item::Entity::find_by_id(item_id.value())
            .filter(item::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(db_err)?;
        match model {
            Some(m) => entity_to_domain(m),
            None => Err(not_found(item_id)),
        }
    }

    async fn create(&self, item: &Item) -> DomainResult<Item> {
        insert_item(&self.db, item).await
    }

    async fn update(&self, item: &Item) -> DomainResult<Item> {
        replace_item(&self.db, item).await
    }

    async fn delete(&self, item_id: &ItemId) -> DomainResult<()> {
        let now = Utc::now();
        let result = item::Entity::update_many()
            .col_expr(item::Column::DeletedAt, Expr::value(Some(now)))
            .col_expr(item::Column::UpdatedAt, Expr::value(now))
            .filter(item::Column::ItemId.eq(item_id.value()))
            .filter(item::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(not_found(item_id));
        }
        info!(item_id = %item_id, "Item deleted");
        Ok(())
    }
}
