use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Comment entity. Owned by its post and removed together with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub author_id: i64,
    pub text: String,
    pub published_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(post_id: i64, author_id: i64, text: String) -> Self {
        Self {
            id: 0,
            post_id,
            author_id,
            text,
            published_at: Utc::now(),
        }
    }
}
