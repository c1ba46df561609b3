//! Data Transfer Objects - flat, render-ready page data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tag with the number of posts carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagBadge {
    pub title: String,
    pub posts_with_tag: u64,
}

/// A post as shown in listings and sidebars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostCard {
    pub title: String,
    pub teaser_text: String,
    pub author: String,
    pub comments_amount: u64,
    pub image_url: Option<String>,
    pub published_at: DateTime<Utc>,
    pub slug: String,
    /// Most popular first.
    pub tags: Vec<TagBadge>,
    /// `None` when the post has no tags.
    pub first_tag_title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentView {
    pub text: String,
    pub published_at: DateTime<Utc>,
    pub author: String,
}

/// A post with its full text, comments and like count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDetail {
    pub title: String,
    pub text: String,
    pub author: String,
    pub comments: Vec<CommentView>,
    pub likes_amount: u64,
    pub image_url: Option<String>,
    pub published_at: DateTime<Utc>,
    pub slug: String,
    pub tags: Vec<TagBadge>,
}

/// `GET /`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomePage {
    pub most_popular_posts: Vec<PostCard>,
    pub page_posts: Vec<PostCard>,
    pub popular_tags: Vec<TagBadge>,
}

/// `GET /posts/{slug}/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPage {
    pub post: PostDetail,
    pub popular_tags: Vec<TagBadge>,
    pub most_popular_posts: Vec<PostCard>,
}

/// `GET /tags/{title}/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagPage {
    pub tag: String,
    pub popular_tags: Vec<TagBadge>,
    pub posts: Vec<PostCard>,
    pub most_popular_posts: Vec<PostCard>,
}

/// `GET /contacts/` has no data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactsPage {}
