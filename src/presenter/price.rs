//! Price JSON shape

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::Price;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceResponse {
    pub price_id: String,
    pub item_id: String,
    pub price_with_tax: i64,
    pub price_without_tax: i64,
    pub tax_rate: f64,
    pub currency: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    /// True while the window is open
    pub active: bool,
}

impl From<&Price> for PriceResponse {
    fn from(p: &Price) -> Self {
        Self {
            price_id: p.price_id().value(),
            item_id: p.item_id().value(),
            price_with_tax: p.price_with_tax(),
            price_without_tax: p.price_without_tax(),
            tax_rate: p.tax_rate(),
            currency: p.currency().to_string(),
            start_date: p.start_date(),
            end_date: p.end_date(),
            active: p.is_active(),
        }
    }
}

impl From<Price> for PriceResponse {
    fn from(p: Price) -> Self {
        Self::from(&p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{Currency, ItemId, PriceWithoutTax, TaxRate};
    use crate::domain::PriceQuote;

    #[test]
    fn serializes_open_window_with_null_end() {
        let quote = PriceQuote::from_amount_without_tax(
            PriceWithoutTax::new(1000).unwrap(),
            TaxRate::new(10.0).unwrap(),
            Currency::Usd,
        )
        .unwrap();
        let price = Price::starting_now(ItemId::generate(), quote);

        let json = serde_json::to_value(PriceResponse::from(&price)).unwrap();
        assert_eq!(json["price_with_tax"], 1100);
        assert_eq!(json["price_without_tax"], 1000);
        assert_eq!(json["tax_rate"], 10.0);
        assert_eq!(json["currency"], "USD");
        assert_eq!(json["active"], true);
        assert!(json["end_date"].is_null());
        assert_eq!(json["price_id"], price.price_id().value());
    }
}
