use std::fmt;

use serde::{Deserialize, Serialize};

use crate::validate::{valid_name, valid_phone, ValidationError};

/// Unique numeric user identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct UserId(pub u32);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered buyer. Never mutated or deleted once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub phone: String,
}

impl User {
    /// Build a user, rejecting malformed names and phone numbers.
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        phone: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if !valid_name(&name) {
            return Err(ValidationError::InvalidName);
        }
        let phone = phone.into();
        if !valid_phone(&phone) {
            return Err(ValidationError::InvalidPhone);
        }
        Ok(User { id, name, phone })
    }
}

/// Next free id: one past the highest id in use, 1 for an empty collection.
pub fn next_user_id(users: &[User]) -> UserId {
    UserId(users.iter().map(|u| u.id.0).max().unwrap_or(0) + 1)
}
