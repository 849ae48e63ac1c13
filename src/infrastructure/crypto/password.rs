//! Password hashing utilities

use bcrypt::{hash, verify};

use crate::domain::value_objects::{Password, PasswordHash};
use crate::domain::{DomainError, DomainResult};

/// bcrypt hasher with a configurable work factor.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a password using bcrypt
    pub fn hash(&self, password: &Password) -> DomainResult<PasswordHash> {
        let hashed = hash(password.expose(), self.cost)
            .map_err(|e| DomainError::Storage(format!("Failed to hash password: {}", e)))?;
        PasswordHash::new(hashed)
    }

    /// Verify a password against a hash. A malformed hash never matches.
    pub fn verify(&self, password: &Password, hash: &PasswordHash) -> bool {
        verify(password.expose(), hash.value()).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hasher = PasswordHasher::new(4);
        let password = Password::new("correct horse").unwrap();
        let hashed = hasher.hash(&password).unwrap();

        assert_ne!(hashed.value(), "correct horse");
        assert!(hasher.verify(&password, &hashed));
        assert!(!hasher.verify(&Password::new("wrong horse").unwrap(), &hashed));
    }

    #[test]
    fn malformed_hash_does_not_verify() {
        let hasher = PasswordHasher::new(4);
        let bogus = PasswordHash::new("not-a-bcrypt-hash").unwrap();
        assert!(!hasher.verify(&Password::new("whatever1").unwrap(), &bogus));
    }
}
