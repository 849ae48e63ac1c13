//! Item domain entity

use chrono::{DateTime, Utc};

use crate::domain::value_objects::{Description, ItemId, ItemName, Stock, UserId};

/// A catalog item owned by one user. Holds no pricing data.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    item_id: ItemId,
    user_id: UserId,
    item_name: ItemName,
    stock: Stock,
    description: Description,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Item {
    /// Build a new item, generating an id when none is given.
    pub fn new(
        item_id: Option<ItemId>,
        user_id: UserId,
        item_name: ItemName,
        stock: Stock,
        description: Description,
    ) -> Self {
        let now = Utc::now();
        Self {
            item_id: item_id.unwrap_or_else(ItemId::generate),
            user_id,
            item_name,
            stock,
            description,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rehydrate an item loaded from storage.
    pub fn restore(
        item_id: ItemId,
        user_id: UserId,
        item_name: ItemName,
        stock: Stock,
        description: Description,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            item_id,
            user_id,
            item_name,
            stock,
            description,
            created_at,
            updated_at,
        }
    }

    /// Full replacement of the mutable fields. Identity, owner and
    /// `created_at` carry over; `updated_at` is refreshed.
    pub fn revise(&self, item_name: ItemName, stock: Stock, description: Description) -> Self {
        Self {
            item_id: self.item_id,
            user_id: self.user_id,
            item_name,
            stock,
            description,
            created_at: self.created_at,
            updated_at: Utc::now(),
        }
    }

    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn item_name(&self) -> &str {
        self.item_name.value()
    }

    pub fn stock(&self) -> bool {
        self.stock.value()
    }

    pub fn description(&self) -> &str {
        self.description.value()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item(item_id: Option<ItemId>) -> Item {
        Item::new(
            item_id,
            UserId::generate(),
            ItemName::new("Tea").unwrap(),
            Stock::new(true),
            Description::new("Green tea leaves").unwrap(),
        )
    }

    #[test]
    fn new_item_gets_fresh_id() {
        let a = sample_item(None);
        let b = sample_item(None);
        assert_ne!(a.item_id(), b.item_id());
        assert_eq!(a.created_at(), a.updated_at());
    }

    #[test]
    fn new_item_keeps_given_id() {
        let id = ItemId::generate();
        assert_eq!(sample_item(Some(id)).item_id(), id);
    }

    #[test]
    fn revise_replaces_mutable_fields_only() {
        let item = sample_item(None);
        let revised = item.revise(
            ItemName::new("Black tea").unwrap(),
            Stock::new(false),
            Description::new("Assam").unwrap(),
        );

        assert_eq!(revised.item_id(), item.item_id());
        assert_eq!(revised.user_id(), item.user_id());
        assert_eq!(revised.created_at(), item.created_at());
        assert!(revised.updated_at() >= item.updated_at());
        assert_eq!(revised.item_name(), "Black tea");
        assert!(!revised.stock());
        assert_eq!(revised.description(), "Assam");
    }
}
