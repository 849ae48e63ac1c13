//! Create prices table
//!
//! One row per price window. An open window has `end_date IS NULL`; the
//! partial unique index allows at most one per item.

use sea_orm::{ConnectionTrait, DbBackend};
use sea_orm_migration::prelude::*;

use super::m20240101_000002_create_items::Items;

pub const ONE_ACTIVE_PRICE_INDEX: &str = "idx_prices_one_active_per_item";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Prices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Prices::PriceId)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Prices::ItemId).string_len(36).not_null())
                    .col(ColumnDef::new(Prices::PriceWithTax).big_integer().not_null())
                    .col(
                        ColumnDef::new(Prices::PriceWithoutTax)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Prices::TaxRate).double().not_null())
                    .col(ColumnDef::new(Prices::Currency).string_len(3).not_null())
                    .col(
                        ColumnDef::new(Prices::StartDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Prices::EndDate).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Prices::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Prices::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_prices_item")
                            .from(Prices::Table, Prices::ItemId)
                            .to(Items::Table, Items::ItemId)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_prices_item_start")
                    .table(Prices::Table)
                    .col(Prices::ItemId)
                    .col(Prices::StartDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_prices_item_end")
                    .table(Prices::Table)
                    .col(Prices::ItemId)
                    .col(Prices::EndDate)
                    .to_owned(),
            )
            .await?;

        // Partial indexes are not expressible through the index builder.
        if matches!(
            manager.get_database_backend(),
            DbBackend::Sqlite | DbBackend::Postgres
        ) {
            manager
                .get_connection()
                .execute_unprepared(&format!(
                    "CREATE UNIQUE INDEX IF NOT EXISTS {} ON prices (item_id) WHERE end_date IS NULL",
                    ONE_ACTIVE_PRICE_INDEX
                ))
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Prices::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Prices {
    Table,
    PriceId,
    ItemId,
    PriceWithTax,
    PriceWithoutTax,
    TaxRate,
    Currency,
    StartDate,
    EndDate,
    CreatedAt,
    UpdatedAt,
}
