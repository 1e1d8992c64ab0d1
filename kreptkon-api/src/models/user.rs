//! User entity and request types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Longest username the store accepts
pub const MAX_USERNAME_LEN: usize = 80;

/// Longest email address the store accepts
pub const MAX_EMAIL_LEN: usize = 120;

/// A user record as stored in the `users` table.
///
/// Records are immutable once created: they are only ever read or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Create user payload.
///
/// Both fields are optional at the wire level so an absent key surfaces as a
/// validation failure with the field named, not as a deserializer rejection.
#[derive(Debug, Default, Deserialize)]
pub struct CreateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
}

/// A validated create payload, ready for insertion
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
}

impl CreateUserRequest {
    /// Validate the payload, enumerating every missing or empty field.
    pub fn validate(self) -> Result<NewUser, Error> {
        let missing: Vec<&str> = [
            ("username", self.username.as_deref()),
            ("email", self.email.as_deref()),
        ]
        .into_iter()
        .filter(|(_, value)| value.map_or(true, |v| v.trim().is_empty()))
        .map(|(name, _)| name)
        .collect();

        if !missing.is_empty() {
            return Err(Error::Validation(format!(
                "missing required field(s): {}",
                missing.join(", ")
            )));
        }

        let username = self.username.unwrap_or_default();
        let email = self.email.unwrap_or_default();

        if username.len() > MAX_USERNAME_LEN {
            return Err(Error::Validation(format!(
                "username must be at most {MAX_USERNAME_LEN} characters"
            )));
        }
        if email.len() > MAX_EMAIL_LEN {
            return Err(Error::Validation(format!(
                "email must be at most {MAX_EMAIL_LEN} characters"
            )));
        }
        if !email.contains('@') {
            return Err(Error::Validation("invalid email address".to_string()));
        }

        Ok(NewUser { username, email })
    }
}
