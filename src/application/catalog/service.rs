//! Catalog service - item and price orchestration
//!
//! Turns raw requests into value objects, then drives the repositories.
//! Item and price writes of one command commit together through the
//! catalog unit of work.

use std::sync::Arc;

use tracing::info;

use super::request::{CreateItemRequest, PriceInput, UpdateItemRequest};
use crate::domain::value_objects::{Description, ItemId, ItemName, Stock, UserId};
use crate::domain::{DomainError, DomainResult, Item, Price, RepositoryProvider};

/// An item together with the price in effect right now.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDetails {
    pub item: Item,
    pub current_price: Option<Price>,
}

pub struct ItemService {
    repos: Arc<dyn RepositoryProvider>,
}

impl ItemService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn list_items(&self) -> DomainResult<Vec<Item>> {
        self.repos.items().find_all().await
    }

    pub async fn get_item(&self, item_id: &str) -> DomainResult<Item> {
        let item_id = ItemId::new(item_id)?;
        self.repos.items().find_by_id(&item_id).await
    }

    pub async fn item_details(&self, item_id: &str) -> DomainResult<ItemDetails> {
        let item_id = ItemId::new(item_id)?;
        let item = self.repos.items().find_by_id(&item_id).await?;
        let current_price = self.repos.prices().find_current_by_item_id(&item_id).await?;
        Ok(ItemDetails { item, current_price })
    }

    pub async fn price_history(&self, item_id: &str) -> DomainResult<Vec<Price>> {
        let item_id = ItemId::new(item_id)?;
        self.repos.prices().find_by_item_id(&item_id).await
    }

    pub async fn current_price(&self, item_id: &str) -> DomainResult<Option<Price>> {
        let item_id = ItemId::new(item_id)?;
        self.repos.prices().find_current_by_item_id(&item_id).await
    }

    // ── Commands ────────────────────────────────────────────────

    /// Create an item and, when the request carries one, its first price.
    pub async fn create_item(&self, req: CreateItemRequest) -> DomainResult<ItemDetails> {
        let user_id = UserId::new(&req.user_id)?;
        let item_name = ItemName::new(req.item_name)?;
        let description = Description::new(req.description)?;

        if self.repos.users().find_by_id(&user_id).await?.is_none() {
            return Err(DomainError::not_found("User", "user_id", user_id.value()));
        }
        let item = Item::new(None, user_id, item_name, Stock::new(req.stock), description);

        let price = new_price(&item, req.price.as_ref())?;
        let saved = self
            .repos
            .catalog()
            .create_item_with_price(&item, price.as_ref())
            .await?;

        info!(
            item_id = %saved.item_id(),
            user_id = %saved.user_id(),
            priced = price.is_some(),
            "Item created"
        );
        Ok(ItemDetails {
            item: saved,
            current_price: price,
        })
    }

    /// Replace an item's mutable fields and, when the request carries
    /// one, version its price.
    pub async fn update_item(&self, req: UpdateItemRequest) -> DomainResult<ItemDetails> {
        let item_id = ItemId::new(&req.item_id)?;
        let item_name = ItemName::new(req.item_name)?;
        let description = Description::new(req.description)?;
        let stock = Stock::new(req.stock);

        let existing = self.repos.items().find_by_id(&item_id).await?;
        let revised = existing.revise(item_name, stock, description);

        let price = new_price(&revised, req.price.as_ref())?;
        let saved = self
            .repos
            .catalog()
            .update_item_with_price(&revised, price.as_ref())
            .await?;

        info!(item_id = %saved.item_id(), repriced = price.is_some(), "Item updated");

        let current_price = match price {
            Some(p) => Some(p),
            None => self.repos.prices().find_current_by_item_id(&item_id).await?,
        };
        Ok(ItemDetails {
            item: saved,
            current_price,
        })
    }

    /// Soft delete. The price history stays in place.
    pub async fn delete_item(&self, item_id: &str) -> DomainResult<()> {
        let item_id = ItemId::new(item_id)?;
        self.repos.items().delete(&item_id).await?;
        info!(item_id = %item_id, "Item deleted");
        Ok(())
    }
}

/// Open-ended price window starting now, validated before anything is
/// written.
fn new_price(item: &Item, input: Option<&PriceInput>) -> DomainResult<Option<Price>> {
    match input {
        Some(p) => Ok(Some(Price::starting_now(item.item_id(), p.to_quote()?))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;
    use crate::infrastructure::database::test_support::{memory_db, seed_user};

    async fn setup() -> (ItemService, UserId) {
        let db = memory_db().await;
        let user_id = seed_user(&db, "seller@example.com").await;
        let repos = Arc::new(SeaOrmRepositoryProvider::new(db));
        (ItemService::new(repos), user_id)
    }

    fn price(without_tax: i64, with_tax: i64) -> PriceInput {
        PriceInput {
            price_with_tax: Some(with_tax),
            price_without_tax: without_tax,
            tax_rate: 10.0,
            currency: "JPY".to_string(),
        }
    }

    fn create_req(user_id: UserId, price: Option<PriceInput>) -> CreateItemRequest {
        CreateItemRequest {
            user_id: user_id.value(),
            item_name: "Teapot".to_string(),
            stock: true,
            description: "Cast iron".to_string(),
            price,
        }
    }

    fn update_req(item_id: ItemId, price: Option<PriceInput>) -> UpdateItemRequest {
        UpdateItemRequest {
            item_id: item_id.value(),
            item_name: "Teapot".to_string(),
            stock: true,
            description: "Cast iron".to_string(),
            price,
        }
    }

    #[tokio::test]
    async fn create_without_price() {
        let (svc, user_id) = setup().await;
        let created = svc.create_item(create_req(user_id, None)).await.unwrap();

        assert!(created.current_price.is_none());
        let id = created.item.item_id().value();
        assert!(svc.current_price(&id).await.unwrap().is_none());
        assert!(svc.price_history(&id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_field_fails_before_writing() {
        let (svc, user_id) = setup().await;
        let mut req = create_req(user_id, Some(price(1000, 1100)));
        req.item_name = "x".repeat(192);
        assert!(matches!(svc.create_item(req).await, Err(DomainError::Validation(_))));

        let mut req = create_req(user_id, Some(price(1000, 1100)));
        req.price.as_mut().unwrap().currency = "XXX".to_string();
        assert!(svc.create_item(req).await.is_err());

        assert!(svc.list_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_user_id_is_rejected() {
        let (svc, user_id) = setup().await;
        let mut req = create_req(user_id, None);
        req.user_id = "not-a-uuid".to_string();
        assert!(matches!(svc.create_item(req).await, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn unknown_owner_is_not_found() {
        let (svc, _) = setup().await;
        let req = create_req(UserId::generate(), Some(price(1000, 1100)));
        let err = svc.create_item(req).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(svc.list_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn end_to_end_price_versioning() {
        let (svc, user_id) = setup().await;
        let t0 = Utc::now();

        let created = svc
            .create_item(create_req(user_id, Some(price(1000, 1100))))
            .await
            .unwrap();
        let id = created.item.item_id();

        let first = svc.current_price(&id.value()).await.unwrap().unwrap();
        assert_eq!(first.price_without_tax(), 1000);
        assert_eq!(first.price_with_tax(), 1100);
        assert_eq!(first.tax_rate(), 10.0);
        assert_eq!(first.currency(), "JPY");
        assert!(first.start_date() >= t0);
        assert!(first.end_date().is_none());

        let t1 = Utc::now();
        svc.update_item(update_req(id, Some(price(2000, 2200))))
            .await
            .unwrap();

        let current = svc.current_price(&id.value()).await.unwrap().unwrap();
        assert_eq!(current.price_without_tax(), 2000);
        assert_eq!(current.price_with_tax(), 2200);
        assert!(current.start_date() >= t1);
        assert!(current.end_date().is_none());

        let history = svc.price_history(&id.value()).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].price_id(), current.price_id());
        let closed = &history[1];
        assert_eq!(closed.price_id(), first.price_id());
        let end = closed.end_date().unwrap();
        assert_eq!(end, current.start_date());
        assert!(end >= t1);
        assert!(end <= Utc::now());
    }

    #[tokio::test]
    async fn history_grows_by_one_per_update() {
        let (svc, user_id) = setup().await;
        let id = svc
            .create_item(create_req(user_id, Some(price(100, 110))))
            .await
            .unwrap()
            .item
            .item_id();

        let updates = 5;
        for n in 1..=updates {
            svc.update_item(update_req(id, Some(price(100 + n, 110 + n))))
                .await
                .unwrap();
        }

        let history = svc.price_history(&id.value()).await.unwrap();
        assert_eq!(history.len(), updates as usize + 1);
        assert_eq!(history.iter().filter(|p| p.is_active()).count(), 1);
        assert!(history
            .windows(2)
            .all(|w| w[0].start_date() >= w[1].start_date()));
        assert_eq!(history[0].price_without_tax(), 105);
    }

    #[tokio::test]
    async fn repricing_unpriced_item_fails_atomically() {
        let (svc, user_id) = setup().await;
        let id = svc
            .create_item(create_req(user_id, None))
            .await
            .unwrap()
            .item
            .item_id();

        let mut req = update_req(id, Some(price(500, 550)));
        req.item_name = "Renamed".to_string();
        let err = svc.update_item(req).await.unwrap_err();
        assert!(matches!(err, DomainError::NoActivePrice(_)));

        assert_eq!(svc.get_item(&id.value()).await.unwrap().item_name(), "Teapot");
        assert!(svc.price_history(&id.value()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_without_price_keeps_current_price() {
        let (svc, user_id) = setup().await;
        let created = svc
            .create_item(create_req(user_id, Some(price(1000, 1100))))
            .await
            .unwrap();
        let id = created.item.item_id();

        let mut req = update_req(id, None);
        req.stock = false;
        req.description = "Sold out".to_string();
        let updated = svc.update_item(req).await.unwrap();

        assert!(!updated.item.stock());
        assert_eq!(updated.item.description(), "Sold out");
        assert_eq!(updated.item.user_id(), user_id);
        assert_eq!(updated.item.created_at(), created.item.created_at());
        assert!(updated.item.updated_at() >= created.item.updated_at());
        assert_eq!(
            updated.current_price.map(|p| p.price_id()),
            created.current_price.map(|p| p.price_id())
        );
        assert_eq!(svc.price_history(&id.value()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_unknown_item_is_not_found() {
        let (svc, _) = setup().await;
        let err = svc
            .update_item(update_req(ItemId::generate(), None))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn details_and_delete() {
        let (svc, user_id) = setup().await;
        let id = svc
            .create_item(create_req(user_id, Some(price(300, 330))))
            .await
            .unwrap()
            .item
            .item_id()
            .value();

        let details = svc.item_details(&id).await.unwrap();
        assert_eq!(details.item.item_name(), "Teapot");
        assert_eq!(details.current_price.unwrap().price_with_tax(), 330);

        svc.delete_item(&id).await.unwrap();
        assert!(svc.get_item(&id).await.unwrap_err().is_not_found());
        assert!(svc.item_details(&id).await.unwrap_err().is_not_found());
        assert!(svc.delete_item(&id).await.unwrap_err().is_not_found());
        assert_eq!(svc.price_history(&id).await.unwrap().len(), 1);
    }
}
