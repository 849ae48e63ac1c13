//! Bounded text fields of an item

use crate::domain::{DomainError, DomainResult};

/// Upper bound shared by item names and descriptions (bytes).
pub const MAX_TEXT_LEN: usize = 191;

fn check_bounds(field: &str, value: &str) -> DomainResult<()> {
    if value.is_empty() {
        return Err(DomainError::Validation(format!(
            "{} must not be empty",
            field
        )));
    }
    if value.len() > MAX_TEXT_LEN {
        return Err(DomainError::Validation(format!(
            "{} must be at most {} bytes, got {}",
            field,
            MAX_TEXT_LEN,
            value.len()
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemName(String);

impl ItemName {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        check_bounds("item name", &value)?;
        Ok(Self(value))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description(String);

impl Description {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        check_bounds("description", &value)?;
        Ok(Self(value))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

/// Whether an item is in stock. Any value is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stock(bool);

impl Stock {
    pub fn new(value: bool) -> Self {
        Self(value)
    }

    pub fn value(&self) -> bool {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_name_round_trip() {
        assert_eq!(ItemName::new("Coffee beans").unwrap().value(), "Coffee beans");
    }

    #[test]
    fn item_name_bounds() {
        assert!(ItemName::new("").is_err());
        assert!(ItemName::new("a".repeat(192)).is_err());
        assert!(ItemName::new("a".repeat(191)).is_ok());
    }

    #[test]
    fn description_bounds() {
        assert!(Description::new("").is_err());
        assert!(Description::new("d".repeat(192)).is_err());
        let max = "d".repeat(191);
        assert_eq!(Description::new(max.clone()).unwrap().value(), max);
    }

    #[test]
    fn length_is_measured_in_bytes() {
        // 64 three-byte characters = 192 bytes
        assert!(ItemName::new("あ".repeat(64)).is_err());
        assert!(ItemName::new("あ".repeat(63)).is_ok());
    }

    #[test]
    fn stock_holds_either_value() {
        assert!(Stock::new(true).value());
        assert!(!Stock::new(false).value());
    }
}
