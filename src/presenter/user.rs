//! User JSON shape. The password hash never leaves the process.

use serde::Serialize;

use crate::domain::User;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<&User> for UserResponse {
    fn from(u: &User) -> Self {
        Self {
            id: u.user_id().value(),
            name: u.name().to_string(),
            email: u.email().value().to_string(),
            role: u.role().value().to_string(),
        }
    }
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self::from(&u)
    }
}
