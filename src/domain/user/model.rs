use chrono::{DateTime, Utc};

use crate::domain::value_objects::{Email, PasswordHash, Permission, Role, UserId};
use crate::domain::{DomainError, DomainResult};

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    user_id: UserId,
    name: String,
    email: Email,
    password_hash: PasswordHash,
    role: Role,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        name: &str,
        email: Email,
        password_hash: PasswordHash,
        role: Role,
    ) -> DomainResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("user name must not be empty"));
        }
        let now = Utc::now();
        Ok(Self {
            user_id: UserId::generate(),
            name: name.to_string(),
            email,
            password_hash,
            role,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn restore(
        user_id: UserId,
        name: String,
        email: Email,
        password_hash: PasswordHash,
        role: Role,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            name,
            email,
            password_hash,
            role,
            created_at,
            updated_at,
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.role.has_permission(permission)
    }
}
