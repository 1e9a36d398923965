/// User domain types
use crate::types::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An account in the system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: UserId,

    /// Sign-in email address (unique)
    pub email: String,

    /// Display name
    pub name: String,

    /// Whether this user may manage the shared song library
    pub is_admin: bool,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new regular user
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: UserId::generate(),
            email: email.into(),
            name: name.into(),
            is_admin: false,
            created_at: Utc::now(),
        }
    }

    /// Create a user with a specific ID (for database loading)
    pub fn with_id(
        id: UserId,
        email: impl Into<String>,
        name: impl Into<String>,
        is_admin: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email: email.into(),
            name: name.into(),
            is_admin,
            created_at,
        }
    }
}
