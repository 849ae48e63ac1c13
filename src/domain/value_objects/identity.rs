//! Email, password, role and permission

use std::fmt;

use validator::ValidateEmail;

use crate::domain::{DomainError, DomainResult};

// ── Email ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn new(value: &str) -> DomainResult<Self> {
        if value.trim().is_empty() {
            return Err(DomainError::validation("email must not be empty"));
        }
        if value.contains("..") || !value.validate_email() || !has_plain_shape(value) {
            return Err(DomainError::Validation(format!(
                "invalid email format: {}",
                value
            )));
        }
        Ok(Self(value.to_string()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// ASCII letters, digits and `._-` before the `@`; a dotted host ending in
/// an alphabetic TLD of at least two letters after it.
fn has_plain_shape(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    plain_part(local, &['.', '_', '-'])
        && plain_part(host, &['.', '-'])
        && tld.len() >= 2
        && tld.chars().all(|c| c.is_ascii_alphabetic())
}

fn plain_part(part: &str, inner: &[char]) -> bool {
    let alnum = |c: char| c.is_ascii_alphanumeric();
    part.starts_with(alnum)
        && part.ends_with(alnum)
        && part.chars().all(|c| alnum(c) || inner.contains(&c))
}

// ── Password ───────────────────────────────────────────────────

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Plain-text password that passed the length policy.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn new(value: &str) -> DomainResult<Self> {
        if value.trim().is_empty() {
            return Err(DomainError::validation("password must not be empty"));
        }
        if value.len() < MIN_PASSWORD_LENGTH {
            return Err(DomainError::Validation(format!(
                "password must be at least {} characters long",
                MIN_PASSWORD_LENGTH
            )));
        }
        if value.len() > MAX_PASSWORD_LENGTH {
            return Err(DomainError::Validation(format!(
                "password must be at most {} characters long",
                MAX_PASSWORD_LENGTH
            )));
        }
        Ok(Self(value.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(****)")
    }
}

impl fmt::Display for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("****")
    }
}

/// bcrypt hash of a password, as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::validation("password hash must not be empty"));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

// ── Permission ─────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    Admin,
    User,
}

impl Permission {
    pub fn new(value: &str) -> DomainResult<Self> {
        match value.trim() {
            "" => Err(DomainError::validation("permission must not be empty")),
            "ADMIN" => Ok(Self::Admin),
            "USER" => Ok(Self::User),
            other => Err(DomainError::Validation(format!("invalid permission: {}", other))),
        }
    }

    pub fn value(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::User => "USER",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

// ── Role ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    Administrator,
    #[default]
    User,
}

impl Role {
    pub fn new(value: &str) -> DomainResult<Self> {
        match value.trim() {
            "" => Err(DomainError::validation("role must not be empty")),
            "ADMINISTRATOR" => Ok(Self::Administrator),
            "USER" => Ok(Self::User),
            other => Err(DomainError::Validation(format!("invalid role: {}", other))),
        }
    }

    pub fn value(&self) -> &'static str {
        match self {
            Self::Administrator => "ADMINISTRATOR",
            Self::User => "USER",
        }
    }

    /// Administrators hold every permission; users only `USER`.
    pub fn has_permission(&self, permission: Permission) -> bool {
        match self {
            Self::Administrator => true,
            Self::User => permission == Permission::User,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_accepts_valid_address() {
        let email = Email::new("alice@example.com").unwrap();
        assert_eq!(email.value(), "alice@example.com");
        assert_eq!(email, Email::new("alice@example.com").unwrap());
    }

    #[test]
    fn email_rejects_invalid() {
        assert!(Email::new("").is_err());
        assert!(Email::new("   ").is_err());
        assert!(Email::new("no-at-sign").is_err());
        assert!(Email::new("a..b@example.com").is_err());
    }

    #[test]
    fn email_requires_plain_dotted_address() {
        assert!(Email::new("user@localhost").is_err());
        assert!(Email::new("a+b@x.com").is_err());
        assert!(Email::new("a@b.c").is_err());
        assert!(Email::new("-a@example.com").is_err());
        assert!(Email::new("a@example.com1").is_err());
        assert!(Email::new("first.last_1@mail.example.co").is_ok());
        assert!(Email::new("x-y@sub-domain.example.org").is_ok());
    }

    #[test]
    fn password_length_policy() {
        assert!(Password::new("").is_err());
        assert!(Password::new("short").is_err());
        assert!(Password::new(&"p".repeat(129)).is_err());
        assert!(Password::new("password1").is_ok());
        assert!(Password::new(&"p".repeat(128)).is_ok());
    }

    #[test]
    fn password_is_masked() {
        let p = Password::new("hunter2hunter2").unwrap();
        assert_eq!(p.to_string(), "****");
        assert!(!format!("{:?}", p).contains("hunter2"));
        assert_eq!(p, Password::new("hunter2hunter2").unwrap());
    }

    #[test]
    fn role_parsing() {
        assert_eq!(Role::new("ADMINISTRATOR").unwrap(), Role::Administrator);
        assert_eq!(Role::new("USER").unwrap(), Role::User);
        assert!(Role::new("admin").is_err());
        assert!(Role::new(" ").is_err());
    }

    #[test]
    fn permission_parsing() {
        assert_eq!(Permission::new("ADMIN").unwrap(), Permission::Admin);
        assert!(Permission::new("ROOT").is_err());
        assert!(Permission::new("").is_err());
    }

    #[test]
    fn role_permissions() {
        assert!(Role::Administrator.has_permission(Permission::Admin));
        assert!(Role::Administrator.has_permission(Permission::User));
        assert!(Role::User.has_permission(Permission::User));
        assert!(!Role::User.has_permission(Permission::Admin));
    }
}
