//! Read models pairing an entity with values derived at query time.
//!
//! Counts are computed from the current relations on every read and are never
//! written back to the entities.

use super::{Comment, Post, Tag, User};

/// A post annotated with its comment count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostWithComments {
    pub post: Post,
    pub num_comments: u64,
}

/// A tag annotated with the number of posts carrying it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagWithPosts {
    pub tag: Tag,
    pub num_posts: u64,
}

/// Everything a post listing needs for a single post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostSummary {
    pub post: Post,
    pub author: User,
    pub num_comments: u64,
    /// Ordered by popularity, most popular first.
    pub tags: Vec<TagWithPosts>,
}

impl PostSummary {
    /// Title of the most popular tag, if the post has any tags.
    pub fn first_tag_title(&self) -> Option<&str> {
        self.tags.first().map(|t| t.tag.title.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentWithAuthor {
    pub comment: Comment,
    pub author: User,
}

/// Full post page data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDetailView {
    pub post: Post,
    pub author: User,
    pub comments: Vec<CommentWithAuthor>,
    pub num_likes: u64,
    pub tags: Vec<TagWithPosts>,
}
