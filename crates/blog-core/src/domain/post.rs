use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Post entity - a published blog article.
///
/// `id` is zero until the post has been saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub text: String,
    /// Routing key. Unique, and never changes once the post is stored.
    pub slug: String,
    pub published_at: DateTime<Utc>,
    /// Path of the cover image relative to the media root.
    pub image: Option<String>,
    pub author_id: i64,
}

impl Post {
    /// Create a new, unsaved post published now.
    pub fn new(author_id: i64, title: String, text: String, slug: String) -> Self {
        Self {
            id: 0,
            title,
            text,
            slug,
            published_at: Utc::now(),
            image: None,
            author_id,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn published_at(mut self, published_at: DateTime<Utc>) -> Self {
        self.published_at = published_at;
        self
    }

    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }
}
