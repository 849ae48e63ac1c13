//! Item JSON shape

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::price::PriceResponse;
use crate::application::ItemDetails;
use crate::domain::Item;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemResponse {
    pub item_id: String,
    pub user_id: String,
    pub item_name: String,
    pub stock: bool,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_price: Option<PriceResponse>,
}

impl From<&Item> for ItemResponse {
    fn from(i: &Item) -> Self {
        Self {
            item_id: i.item_id().value(),
            user_id: i.user_id().value(),
            item_name: i.item_name().to_string(),
            stock: i.stock(),
            description: i.description().to_string(),
            created_at: i.created_at(),
            updated_at: i.updated_at(),
            current_price: None,
        }
    }
}

impl From<Item> for ItemResponse {
    fn from(i: Item) -> Self {
        Self::from(&i)
    }
}

impl From<ItemDetails> for ItemResponse {
    fn from(d: ItemDetails) -> Self {
        Self {
            current_price: d.current_price.map(PriceResponse::from),
            ..Self::from(&d.item)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{
        Currency, Description, ItemName, PriceWithoutTax, Stock, TaxRate, UserId,
    };
    use crate::domain::{Price, PriceQuote};

    fn item() -> Item {
        Item::new(
            None,
            UserId::generate(),
            ItemName::new("Lamp").unwrap(),
            Stock::new(false),
            Description::new("Brass desk lamp").unwrap(),
        )
    }

    #[test]
    fn bare_item_omits_price() {
        let it = item();
        let json = serde_json::to_value(ItemResponse::from(&it)).unwrap();
        assert_eq!(json["item_id"], it.item_id().value());
        assert_eq!(json["item_name"], "Lamp");
        assert_eq!(json["stock"], false);
        assert!(json.get("current_price").is_none());
    }

    #[test]
    fn details_embed_current_price() {
        let it = item();
        let quote = PriceQuote::from_amount_without_tax(
            PriceWithoutTax::new(200).unwrap(),
            TaxRate::new(10.0).unwrap(),
            Currency::Gbp,
        )
        .unwrap();
        let price = Price::starting_now(it.item_id(), quote);

        let resp = ItemResponse::from(ItemDetails {
            item: it,
            current_price: Some(price),
        });
        let json = serde_json::to_value(resp).unwrap();
        assert_eq!(json["current_price"]["price_with_tax"], 220);
        assert_eq!(json["current_price"]["currency"], "GBP");
    }
}
