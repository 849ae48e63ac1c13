//! User management service - application-layer orchestration
//!
//! Sign-up, credential checks and permission checks. Token issuance is
//! left to whatever transport sits in front of this service.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::value_objects::{Email, Password, Permission, Role, UserId};
use crate::domain::{DomainError, DomainResult, User, UserRepository};
use crate::infrastructure::crypto::PasswordHasher;

/// User service - orchestrates all identity use-cases.
///
/// Generic over `R: UserRepository` so it stays decoupled from
/// the concrete persistence layer.
pub struct UserService<R: UserRepository> {
    repo: Arc<R>,
    hasher: PasswordHasher,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: Arc<R>, hasher: PasswordHasher) -> Self {
        Self { repo, hasher }
    }

    // ── Registration ────────────────────────────────────────────

    /// Register a new user with role `USER`.
    pub async fn sign_up(&self, name: &str, email: &str, password: &str) -> DomainResult<User> {
        self.register(name, email, password, Role::User).await
    }

    /// Create the configured administrator when the user table is empty.
    ///
    /// Returns `None` when users already exist.
    pub async fn bootstrap_admin(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> DomainResult<Option<User>> {
        if self.repo.count().await? > 0 {
            return Ok(None);
        }
        let admin = self.register(name, email, password, Role::Administrator).await?;
        warn!(email = %admin.email(), "Default administrator created, change its password");
        Ok(Some(admin))
    }

    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> DomainResult<User> {
        let email = Email::new(email)?;
        let password = Password::new(password)?;

        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(DomainError::Conflict("Email already exists".into()));
        }

        let hash = self.hasher.hash(&password)?;
        let user = self.repo.create(&User::new(name, email, hash, role)?).await?;

        info!(user_id = %user.user_id(), role = %user.role(), "New user registered");
        Ok(user)
    }

    // ── Authentication ──────────────────────────────────────────

    /// Check email + password and return the matching user.
    pub async fn authenticate(&self, email: &str, password: &str) -> DomainResult<User> {
        let email = Email::new(email)?;
        let password = Password::new(password)?;

        let Some(user) = self.repo.find_by_email(&email).await? else {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        };

        if !self.hasher.verify(&password, user.password_hash()) {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        }

        info!(user_id = %user.user_id(), "User authenticated");
        Ok(user)
    }

    /// Load the user and require `permission`.
    ///
    /// Unknown users are `Unauthorized`; known users lacking the
    /// permission are `Forbidden`.
    pub async fn authorize(&self, user_id: &str, permission: Permission) -> DomainResult<User> {
        let user_id = UserId::new(user_id)?;
        let Some(user) = self.repo.find_by_id(&user_id).await? else {
            return Err(DomainError::Unauthorized("User not found".into()));
        };

        if !user.has_permission(permission) {
            warn!(user_id = %user_id, permission = %permission, "Permission denied");
            return Err(DomainError::Forbidden(format!(
                "{} permission required",
                permission
            )));
        }
        Ok(user)
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn get_user(&self, user_id: &str) -> DomainResult<User> {
        let id = UserId::new(user_id)?;
        self.repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", id.value()))
    }
}
