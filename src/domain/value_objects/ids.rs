//! UUID-backed identifiers

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::domain::{DomainError, DomainResult};

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new(value: &str) -> DomainResult<Self> {
                if value.trim().is_empty() {
                    return Err(DomainError::validation(concat!($label, " is required")));
                }
                Uuid::parse_str(value)
                    .map(Self)
                    .map_err(|_| DomainError::Validation(format!("invalid UUID for {}: {}", $label, value)))
            }

            /// Fresh random (v4) identifier.
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }

            /// Canonical hyphenated lowercase form.
            pub fn value(&self) -> String {
                self.0.to_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}

uuid_id!(
    /// Identity of an item.
    ItemId,
    "item id"
);
uuid_id!(
    /// Identity of a user.
    UserId,
    "user id"
);
uuid_id!(
    /// Identity of one price row.
    PriceId,
    "price id"
);
