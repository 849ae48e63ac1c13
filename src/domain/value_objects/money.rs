//! Currency, tax rate and price amounts

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::domain::{DomainError, DomainResult};

// ── Currency ───────────────────────────────────────────────────

/// Supported ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Currency {
    Jpy,
    Usd,
    Eur,
    Gbp,
    Cny,
    Krw,
}

impl Currency {
    pub const ALL: [Currency; 6] = [
        Currency::Jpy,
        Currency::Usd,
        Currency::Eur,
        Currency::Gbp,
        Currency::Cny,
        Currency::Krw,
    ];

    /// Parse a currency code. Lowercase input is accepted and normalized.
    pub fn new(value: &str) -> DomainResult<Self> {
        if value.is_empty() {
            return Err(DomainError::validation("currency code is required"));
        }

        let upper = value.to_uppercase();
        if upper.len() != 3 {
            return Err(DomainError::Validation(format!(
                "currency code must be 3 letters: {}",
                value
            )));
        }

        Self::ALL
            .iter()
            .copied()
            .find(|c| c.value() == upper)
            .ok_or_else(|| DomainError::Validation(format!("unsupported currency code: {}", upper)))
    }

    pub fn value(&self) -> &'static str {
        match self {
            Self::Jpy => "JPY",
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Cny => "CNY",
            Self::Krw => "KRW",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl FromStr for Currency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

// ── TaxRate ────────────────────────────────────────────────────

/// The only tax rate currently accepted (percent).
pub const ALLOWED_TAX_RATE: f64 = 10.0;

/// Tax rate in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxRate(f64);

impl TaxRate {
    pub fn new(value: f64) -> DomainResult<Self> {
        if value != ALLOWED_TAX_RATE {
            return Err(DomainError::Validation(format!(
                "tax rate must be {}%, got {}",
                ALLOWED_TAX_RATE, value
            )));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Tax-inclusive amount for `amount` (tax-exclusive), truncated toward zero.
    pub fn apply(&self, amount: i64) -> DomainResult<i64> {
        let rate = Decimal::try_from(self.0)
            .map_err(|e| DomainError::Validation(format!("tax rate not representable: {}", e)))?;
        let gross = Decimal::from(amount) * (Decimal::ONE + rate / Decimal::ONE_HUNDRED);
        gross
            .trunc()
            .to_i64()
            .ok_or_else(|| DomainError::Validation(format!("amount out of range: {}", gross)))
    }
}

// ── Amounts ────────────────────────────────────────────────────

/// Exclusive upper bound for any price amount.
pub const MAX_PRICE: i64 = 100_000_000;

fn check_amount(label: &str, value: i64) -> DomainResult<()> {
    if value < 0 {
        return Err(DomainError::Validation(format!(
            "{} must be 0 or greater, got {}",
            label, value
        )));
    }
    if value >= MAX_PRICE {
        return Err(DomainError::Validation(format!(
            "{} must be less than {}, got {}",
            label, MAX_PRICE, value
        )));
    }
    Ok(())
}

/// Tax-inclusive amount in the smallest currency unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PriceWithTax(i64);

impl PriceWithTax {
    pub fn new(value: i64) -> DomainResult<Self> {
        check_amount("price with tax", value)?;
        Ok(Self(value))
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Tax-exclusive amount in the smallest currency unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PriceWithoutTax(i64);

impl PriceWithoutTax {
    pub fn new(value: i64) -> DomainResult<Self> {
        check_amount("price without tax", value)?;
        Ok(Self(value))
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_is_normalized_to_uppercase() {
        let c = Currency::new("jpy").unwrap();
        assert_eq!(c, Currency::Jpy);
        assert_eq!(c.value(), "JPY");
        assert_eq!(Currency::new("Usd").unwrap().to_string(), "USD");
    }

    #[test]
    fn currency_round_trip_for_whitelist() {
        for code in ["JPY", "USD", "EUR", "GBP", "CNY", "KRW"] {
            assert_eq!(Currency::new(code).unwrap().value(), code);
        }
    }

    #[test]
    fn currency_rejections() {
        assert!(Currency::new("").is_err());
        assert!(Currency::new("JP").is_err());
        assert!(Currency::new("JPYY").is_err());
        let err = Currency::new("XXX").unwrap_err();
        assert!(err.to_string().contains("unsupported"));
    }

    #[test]
    fn tax_rate_must_be_exactly_ten() {
        assert_eq!(TaxRate::new(10.0).unwrap().value(), 10.0);
        assert!(TaxRate::new(8.0).is_err());
        assert!(TaxRate::new(10.5).is_err());
        assert!(TaxRate::new(-5.0).is_err());
        assert!(TaxRate::new(f64::NAN).is_err());
    }

    #[test]
    fn tax_rate_apply_is_exact() {
        let rate = TaxRate::new(10.0).unwrap();
        assert_eq!(rate.apply(1000).unwrap(), 1100);
        assert_eq!(rate.apply(3).unwrap(), 3);
        assert_eq!(rate.apply(15).unwrap(), 16);
        assert_eq!(rate.apply(0).unwrap(), 0);
    }

    #[test]
    fn price_bounds() {
        assert_eq!(PriceWithTax::new(0).unwrap().value(), 0);
        assert!(PriceWithTax::new(-1).is_err());
        assert!(PriceWithTax::new(100_000_000).is_err());
        assert_eq!(PriceWithTax::new(99_999_999).unwrap().value(), 99_999_999);

        assert!(PriceWithoutTax::new(-1).is_err());
        assert!(PriceWithoutTax::new(MAX_PRICE).is_err());
        assert_eq!(PriceWithoutTax::new(1000).unwrap().value(), 1000);
    }
}
