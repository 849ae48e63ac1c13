//! SeaORM implementation of PriceRepository
//!
//! Price rows form a per-item timeline. Updating a price never edits a
//! row's amounts: the open window is closed and a new one appended, both
//! inside one transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbBackend,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::{debug, info, warn};

use super::db_err;
use crate::domain::value_objects::{
    Currency, ItemId, PriceId, PriceWithTax, PriceWithoutTax, TaxRate,
};
use crate::domain::{DomainError, DomainResult, Price, PriceQuote, PriceRepository};
use crate::infrastructure::database::entities::price;

// ── Conversion helpers ──────────────────────────────────────────

fn entity_to_domain(m: price::Model) -> DomainResult<Price> {
    let quote = PriceQuote::new(
        PriceWithTax::new(m.price_with_tax)?,
        PriceWithoutTax::new(m.price_without_tax)?,
        TaxRate::new(m.tax_rate)?,
        Currency::new(&m.currency)?,
    );
    Ok(Price::restore(
        PriceId::new(&m.price_id)?,
        ItemId::new(&m.item_id)?,
        quote,
        m.start_date,
        m.end_date,
        m.created_at,
        m.updated_at,
    ))
}

fn domain_to_active(p: &Price) -> price::ActiveModel {
    price::ActiveModel {
        price_id: Set(p.price_id().value()),
        item_id: Set(p.item_id().value()),
        price_with_tax: Set(p.price_with_tax()),
        price_without_tax: Set(p.price_without_tax()),
        tax_rate: Set(p.tax_rate()),
        currency: Set(p.currency().to_string()),
        start_date: Set(p.start_date()),
        end_date: Set(p.end_date()),
        created_at: Set(p.created_at()),
        updated_at: Set(p.updated_at()),
    }
}

/// `start_date <= at AND (end_date IS NULL OR end_date > at)`
fn effective_at(at: DateTime<Utc>) -> Condition {
    Condition::all()
        .add(price::Column::StartDate.lte(at))
        .add(
            Condition::any()
                .add(price::Column::EndDate.is_null())
                .add(price::Column::EndDate.gt(at)),
        )
}

// ── Connection-generic operations ───────────────────────────────

pub(super) async fn insert_price<C: ConnectionTrait>(conn: &C, p: &Price) -> DomainResult<Price> {
    let saved = domain_to_active(p).insert(conn).await.map_err(db_err)?;
    info!(
        price_id = %saved.price_id,
        item_id = %saved.item_id,
        price_with_tax = saved.price_with_tax,
        currency = %saved.currency,
        "Price created"
    );
    entity_to_domain(saved)
}

/// Close the open window(s) of `item_id` and append `p`.
///
/// Open windows end where `p` starts, so the timeline has no overlap. A
/// window scheduled to start after that point collapses to zero length
/// rather than ending before it began.
///
/// Must run inside a transaction. Fails with `NoActivePrice` before
/// inserting anything when no window is open.
pub(super) async fn close_and_insert<C: ConnectionTrait>(
    conn: &C,
    item_id: &ItemId,
    p: &Price,
) -> DomainResult<Price> {
    // SQLite serializes writers on its own; other backends lock the open rows.
    if conn.get_database_backend() != DbBackend::Sqlite {
        price::Entity::find()
            .filter(price::Column::ItemId.eq(item_id.value()))
            .filter(price::Column::EndDate.is_null())
            .lock_exclusive()
            .all(conn)
            .await
            .map_err(db_err)?;
    }

    let close_at = p.start_date();
    let now = Utc::now();
    let ended = price::Entity::update_many()
        .col_expr(price::Column::EndDate, Expr::value(Some(close_at)))
        .col_expr(price::Column::UpdatedAt, Expr::value(now))
        .filter(price::Column::ItemId.eq(item_id.value()))
        .filter(price::Column::EndDate.is_null())
        .filter(price::Column::StartDate.lte(close_at))
        .exec(conn)
        .await
        .map_err(db_err)?;
    let collapsed = price::Entity::update_many()
        .col_expr(price::Column::EndDate, Expr::col(price::Column::StartDate).into())
        .col_expr(price::Column::UpdatedAt, Expr::value(now))
        .filter(price::Column::ItemId.eq(item_id.value()))
        .filter(price::Column::EndDate.is_null())
        .exec(conn)
        .await
        .map_err(db_err)?;

    let closed = ended.rows_affected + collapsed.rows_affected;
    if closed == 0 {
        warn!(item_id = %item_id, "Price update rejected: no active price");
        return Err(DomainError::NoActivePrice(item_id.value()));
    }
    debug!(
        item_id = %item_id,
        closed,
        collapsed = collapsed.rows_affected,
        "Closed active price window"
    );

    insert_price(conn, p).await
}

// ── SeaOrmPriceRepository ───────────────────────────────────────

pub struct SeaOrmPriceRepository {
    db: DatabaseConnection,
}

impl SeaOrmPriceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PriceRepository for SeaOrmPriceRepository {
    async fn create(&self, p: &Price) -> DomainResult<Price> {
        insert_price(&self.db, p).await
    }

    async fn find_by_id(&self, price_id: &PriceId) -> DomainResult<Price> {
        let model = price::Entity::find_by_id(price_id.value())
            .one(&self.db)
            .await
            .map_err(db_err)?;
        match model {
            Some(m) => entity_to_domain(m),
            None => Err(DomainError::not_found("Price", "price_id", price_id.value())),
        }
    }

    async fn find_by_item_id(&self, item_id: &ItemId) -> DomainResult<Vec<Price>> {
        let models = price::Entity::find()
            .filter(price::Column::ItemId.eq(item_id.value()))
            .order_by_desc(price::Column::StartDate)
            .order_by_desc(price::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(entity_to_domain).collect()
    }

    async fn find_current_by_item_id(&self, item_id: &ItemId) -> DomainResult<Option<Price>> {
        self.find_effective_at(item_id, Utc::now()).await
    }

    async fn find_effective_at(
        &self,
        item_id: &ItemId,
        at: DateTime<Utc>,
    ) -> DomainResult<Option<Price>> {
        let model = price::Entity::find()
            .filter(price::Column::ItemId.eq(item_id.value()))
            .filter(effective_at(at))
            .order_by_desc(price::Column::StartDate)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(entity_to_domain).transpose()
    }

    async fn update_by_item_id(&self, item_id: &ItemId, p: &Price) -> DomainResult<Price> {
        let txn = self.db.begin().await.map_err(db_err)?;
        // Dropping `txn` on the error path rolls it back.
        let saved = close_and_insert(&txn, item_id, p).await?;
        txn.commit().await.map_err(db_err)?;
        Ok(saved)
    }

    async fn delete(&self, price_id: &PriceId) -> DomainResult<()> {
        let result = price::Entity::delete_by_id(price_id.value())
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        debug!(price_id = %price_id, rows = result.rows_affected, "Price deleted");
        Ok(())
    }
}
