//! User principals.
//!
//! Authentication happens outside this library; a [`User`] row only exists
//! so bookings can reference the principal that made them.

use std::fmt;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Maximum length of a username.
pub const MAX_USERNAME_LEN: usize = 64;

/// Store-generated identifier of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for UserId {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value <= 0 {
            return Err(ValidationError::new(
                "user_id",
                format!("user id must be a positive integer, got {value}"),
            ));
        }
        Ok(Self(value))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    username: String,
    created_at: SystemTime,
}

impl User {
    pub(crate) const fn from_parts(id: UserId, username: String, created_at: SystemTime) -> Self {
        Self {
            id,
            username,
            created_at,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns when the user was registered.
    #[must_use]
    pub const fn created_at(&self) -> SystemTime {
        self.created_at
    }
}

/// Validates a username: trimmed, non-empty, bounded, no inner whitespace.
///
/// # Errors
///
/// Returns a [`ValidationError`] naming the `username` field.
///
/// # Examples
///
/// ```
/// use railbook::user::validate_username;
///
/// assert_eq!(validate_username(" alice ").unwrap(), "alice");
/// assert!(validate_username("").is_err());
/// assert!(validate_username("a b").is_err());
/// ```
pub fn validate_username(username: &str) -> Result<String, ValidationError> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(
            "username",
            "username must be non-empty after trimming whitespace",
        ));
    }
    if trimmed.chars().count() > MAX_USERNAME_LEN {
        return Err(ValidationError::new(
            "username",
            format!("username must be at most {MAX_USERNAME_LEN} characters"),
        ));
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(ValidationError::new(
            "username",
            "username must not contain whitespace",
        ));
    }
    Ok(trimmed.to_string())
}
