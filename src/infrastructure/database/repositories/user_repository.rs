use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, Set,
};
use tracing::info;

use super::db_err;
use crate::domain::value_objects::{Email, PasswordHash, Role, UserId};
use crate::domain::{DomainResult, User, UserRepository};
use crate::infrastructure::database::entities::user;

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_role_to_domain(role: user::UserRole) -> Role {
    match role {
        user::UserRole::Administrator => Role::Administrator,
        user::UserRole::User => Role::User,
    }
}

fn domain_role_to_entity(role: Role) -> user::UserRole {
    match role {
        Role::Administrator => user::UserRole::Administrator,
        Role::User => user::UserRole::User,
    }
}

fn user_model_to_domain(model: user::Model) -> DomainResult<User> {
    Ok(User::restore(
        UserId::new(&model.id)?,
        model.name,
        Email::new(&model.email)?,
        PasswordHash::new(model.password_hash)?,
        entity_role_to_domain(model.role),
        model.created_at,
        model.updated_at,
    ))
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn create(&self, u: &User) -> DomainResult<User> {
        let new_user = user::ActiveModel {
            id: Set(u.user_id().value()),
            name: Set(u.name().to_string()),
            email: Set(u.email().value().to_string()),
            password_hash: Set(u.password_hash().value().to_string()),
            role: Set(domain_role_to_entity(u.role())),
            created_at: Set(u.created_at()),
            updated_at: Set(u.updated_at()),
        };
        let saved = new_user.insert(&self.db).await.map_err(db_err)?;
        info!(user_id = %saved.id, role = ?saved.role, "User created");
        user_model_to_domain(saved)
    }

    async fn find_by_id(&self, user_id: &UserId) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(user_id.value())
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(user_model_to_domain).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email.value()))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(user_model_to_domain).transpose()
    }

    async fn count(&self) -> DomainResult<u64> {
        user::Entity::find().count(&self.db).await.map_err(db_err)
    }
}
