use async_trait::async_trait;

use super::User;
use crate::domain::value_objects::{Email, UserId};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `Conflict` when the email is already registered.
    async fn create(&self, user: &User) -> DomainResult<User>;

    async fn find_by_id(&self, user_id: &UserId) -> DomainResult<Option<User>>;
    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<User>>;

    async fn count(&self) -> DomainResult<u64>;
}
