//! Price domain entity
//!
//! A price row is one time window of an item's price history. Rows are
//! never edited in place: a price change closes the active window and
//! appends a new one.

use chrono::{DateTime, Utc};

use crate::domain::value_objects::{Currency, ItemId, PriceId, PriceWithTax, PriceWithoutTax, TaxRate};
use crate::domain::{DomainError, DomainResult};

// ── PriceQuote ─────────────────────────────────────────────────

/// Validated amounts, tax rate and currency of one price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceQuote {
    pub price_with_tax: PriceWithTax,
    pub price_without_tax: PriceWithoutTax,
    pub tax_rate: TaxRate,
    pub currency: Currency,
}

impl PriceQuote {
    pub fn new(
        price_with_tax: PriceWithTax,
        price_without_tax: PriceWithoutTax,
        tax_rate: TaxRate,
        currency: Currency,
    ) -> Self {
        Self {
            price_with_tax,
            price_without_tax,
            tax_rate,
            currency,
        }
    }

    /// Build a quote from the tax-exclusive amount, deriving the
    /// tax-inclusive one (truncated toward zero).
    pub fn from_amount_without_tax(
        price_without_tax: PriceWithoutTax,
        tax_rate: TaxRate,
        currency: Currency,
    ) -> DomainResult<Self> {
        let with_tax = tax_rate.apply(price_without_tax.value())?;
        Ok(Self::new(
            PriceWithTax::new(with_tax)?,
            price_without_tax,
            tax_rate,
            currency,
        ))
    }
}

// ── Price ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Price {
    price_id: PriceId,
    item_id: ItemId,
    quote: PriceQuote,
    start_date: DateTime<Utc>,
    end_date: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Price {
    /// Build a new price window. A missing id is generated.
    ///
    /// Fails when `end_date` lies before `start_date`.
    pub fn new(
        price_id: Option<PriceId>,
        item_id: ItemId,
        quote: PriceQuote,
        start_date: DateTime<Utc>,
        end_date: Option<DateTime<Utc>>,
    ) -> DomainResult<Self> {
        check_window(start_date, end_date)?;
        let now = Utc::now();
        Ok(Self {
            price_id: price_id.unwrap_or_else(PriceId::generate),
            item_id,
            quote,
            start_date,
            end_date,
            created_at: now,
            updated_at: now,
        })
    }

    /// Open-ended window starting now.
    pub fn starting_now(item_id: ItemId, quote: PriceQuote) -> Self {
        let now = Utc::now();
        Self {
            price_id: PriceId::generate(),
            item_id,
            quote,
            start_date: now,
            end_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rehydrate a price loaded from storage.
    pub fn restore(
        price_id: PriceId,
        item_id: ItemId,
        quote: PriceQuote,
        start_date: DateTime<Utc>,
        end_date: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            price_id,
            item_id,
            quote,
            start_date,
            end_date,
            created_at,
            updated_at,
        }
    }

    pub fn price_id(&self) -> PriceId {
        self.price_id
    }

    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    pub fn quote(&self) -> &PriceQuote {
        &self.quote
    }

    pub fn price_with_tax(&self) -> i64 {
        self.quote.price_with_tax.value()
    }

    pub fn price_without_tax(&self) -> i64 {
        self.quote.price_without_tax.value()
    }

    pub fn tax_rate(&self) -> f64 {
        self.quote.tax_rate.value()
    }

    pub fn currency(&self) -> &'static str {
        self.quote.currency.value()
    }

    pub fn start_date(&self) -> DateTime<Utc> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<DateTime<Utc>> {
        self.end_date
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Open window (no end date).
    pub fn is_active(&self) -> bool {
        self.end_date.is_none()
    }

    /// `start_date <= at < end_date`, with an open end treated as infinite.
    pub fn is_effective_at(&self, at: DateTime<Utc>) -> bool {
        self.start_date <= at && self.end_date.map_or(true, |end| end > at)
    }
}

fn check_window(start_date: DateTime<Utc>, end_date: Option<DateTime<Utc>>) -> DomainResult<()> {
    match end_date {
        Some(end) if end < start_date => Err(DomainError::Validation(format!(
            "price end date {} is before start date {}",
            end.to_rfc3339(),
            start_date.to_rfc3339()
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn quote(without_tax: i64) -> PriceQuote {
        PriceQuote::from_amount_without_tax(
            PriceWithoutTax::new(without_tax).unwrap(),
            TaxRate::new(10.0).unwrap(),
            Currency::Jpy,
        )
        .unwrap()
    }

    #[test]
    fn quote_derives_tax_inclusive_amount() {
        let q = quote(1000);
        assert_eq!(q.price_with_tax.value(), 1100);
        assert_eq!(q.price_without_tax.value(), 1000);
        assert_eq!(q.currency, Currency::Jpy);
    }

    #[test]
    fn quote_derivation_rejects_overflowing_total() {
        let result = PriceQuote::from_amount_without_tax(
            PriceWithoutTax::new(99_999_999).unwrap(),
            TaxRate::new(10.0).unwrap(),
            Currency::Usd,
        );
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn new_price_generates_id_and_keeps_fields() {
        let item_id = ItemId::generate();
        let start = Utc::now();
        let price = Price::new(None, item_id, quote(500), start, None).unwrap();

        assert_eq!(price.item_id(), item_id);
        assert_eq!(price.price_with_tax(), 550);
        assert_eq!(price.price_without_tax(), 500);
        assert_eq!(price.tax_rate(), 10.0);
        assert_eq!(price.currency(), "JPY");
        assert_eq!(price.start_date(), start);
        assert!(price.is_active());
    }

    #[test]
    fn new_price_keeps_given_id() {
        let id = PriceId::generate();
        let price = Price::new(Some(id), ItemId::generate(), quote(1), Utc::now(), None).unwrap();
        assert_eq!(price.price_id(), id);
    }

    #[test]
    fn end_before_start_is_rejected() {
        let start = Utc::now();
        let result = Price::new(
            None,
            ItemId::generate(),
            quote(100),
            start,
            Some(start - Duration::seconds(1)),
        );
        assert!(matches!(result, Err(DomainError::Validation(_))));

        let zero_length = Price::new(None, ItemId::generate(), quote(100), start, Some(start));
        assert!(zero_length.is_ok());
    }

    #[test]
    fn effective_window_is_half_open() {
        let start = Utc::now() - Duration::days(2);
        let end = start + Duration::days(1);
        let price = Price::new(None, ItemId::generate(), quote(100), start, Some(end)).unwrap();

        assert!(!price.is_active());
        assert!(price.is_effective_at(start));
        assert!(price.is_effective_at(end - Duration::seconds(1)));
        assert!(!price.is_effective_at(end));
        assert!(!price.is_effective_at(start - Duration::seconds(1)));
    }

    #[test]
    fn open_window_is_effective_from_start_on() {
        let price = Price::starting_now(ItemId::generate(), quote(100));
        assert!(price.is_active());
        assert!(price.is_effective_at(price.start_date() + Duration::days(365)));
    }
}
