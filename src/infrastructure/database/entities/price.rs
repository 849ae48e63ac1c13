//! Price entity - one time window of an item's price history

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "prices")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub price_id: String,

    pub item_id: String,

    /// Tax-inclusive amount (smallest currency unit)
    pub price_with_tax: i64,

    /// Tax-exclusive amount (smallest currency unit)
    pub price_without_tax: i64,

    /// Tax rate in percent
    pub tax_rate: f64,

    /// Currency code (ISO 4217, e.g., "JPY", "USD")
    pub currency: String,

    /// Window start
    pub start_date: DateTime<Utc>,

    /// Window end, `None` while the price is active
    pub end_date: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::item::Entity",
        from = "Column::ItemId",
        to = "super::item::Column::ItemId"
    )]
    Item,
}

impl Related<super::item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Item.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
