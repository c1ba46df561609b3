use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity - authors posts and comments, and likes posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new, unsaved user.
    pub fn new(username: String, email: String) -> Self {
        Self {
            id: 0,
            username,
            email,
            created_at: Utc::now(),
        }
    }
}
