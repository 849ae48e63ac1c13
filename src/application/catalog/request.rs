//! Inbound catalog commands
//!
//! Raw, unvalidated input as a controller or the CLI receives it. Nothing
//! here is trusted until converted into value objects.

use serde::Deserialize;

use crate::domain::value_objects::{Currency, PriceWithTax, PriceWithoutTax, TaxRate};
use crate::domain::{DomainResult, PriceQuote};

/// A complete new price. Either the whole input is present or there is
/// no price change at all.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PriceInput {
    /// Derived from `price_without_tax` and `tax_rate` when omitted.
    #[serde(default)]
    pub price_with_tax: Option<i64>,
    pub price_without_tax: i64,
    pub tax_rate: f64,
    pub currency: String,
}

impl PriceInput {
    pub fn to_quote(&self) -> DomainResult<PriceQuote> {
        let without_tax = PriceWithoutTax::new(self.price_without_tax)?;
        let tax_rate = TaxRate::new(self.tax_rate)?;
        let currency = Currency::new(&self.currency)?;

        match self.price_with_tax {
            Some(with_tax) => Ok(PriceQuote::new(
                PriceWithTax::new(with_tax)?,
                without_tax,
                tax_rate,
                currency,
            )),
            None => PriceQuote::from_amount_without_tax(without_tax, tax_rate, currency),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateItemRequest {
    pub user_id: String,
    pub item_name: String,
    pub stock: bool,
    pub description: String,
    #[serde(default)]
    pub price: Option<PriceInput>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateItemRequest {
    pub item_id: String,
    pub item_name: String,
    pub stock: bool,
    pub description: String,
    #[serde(default)]
    pub price: Option<PriceInput>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    fn input(price_with_tax: Option<i64>) -> PriceInput {
        PriceInput {
            price_with_tax,
            price_without_tax: 1000,
            tax_rate: 10.0,
            currency: "jpy".to_string(),
        }
    }

    #[test]
    fn explicit_amount_is_kept() {
        let quote = input(Some(1100)).to_quote().unwrap();
        assert_eq!(quote.price_with_tax.value(), 1100);
        assert_eq!(quote.currency, Currency::Jpy);
    }

    #[test]
    fn missing_amount_is_derived() {
        let quote = input(None).to_quote().unwrap();
        assert_eq!(quote.price_with_tax.value(), 1100);
    }

    #[test]
    fn invalid_fields_are_rejected() {
        let mut bad_rate = input(None);
        bad_rate.tax_rate = 8.0;
        assert!(matches!(bad_rate.to_quote(), Err(DomainError::Validation(_))));

        let mut bad_currency = input(None);
        bad_currency.currency = "XXX".to_string();
        assert!(bad_currency.to_quote().is_err());

        assert!(input(Some(-1)).to_quote().is_err());
    }

    #[test]
    fn price_is_optional_in_json() {
        let req: CreateItemRequest = serde_json::from_str(
            r#"{"user_id":"550e8400-e29b-41d4-a716-446655440000","item_name":"Tea","stock":true,"description":"Leaves"}"#,
        )
        .unwrap();
        assert!(req.price.is_none());

        let req: UpdateItemRequest = serde_json::from_str(
            r#"{"item_id":"550e8400-e29b-41d4-a716-446655440000","item_name":"Tea","stock":false,"description":"Leaves",
                "price":{"price_without_tax":500,"tax_rate":10.0,"currency":"USD"}}"#,
        )
        .unwrap();
        assert_eq!(req.price.unwrap().price_with_tax, None);
    }
}
