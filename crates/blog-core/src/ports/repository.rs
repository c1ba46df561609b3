use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::{Comment, Post, Tag, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository.
///
/// Popularity is the number of likes; ties keep id order.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i64> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    /// Most liked posts first.
    async fn find_popular(&self, limit: u64) -> Result<Vec<Post>, RepoError>;

    /// Newest posts first.
    async fn find_fresh(&self, limit: u64) -> Result<Vec<Post>, RepoError>;

    /// Posts carrying the tag, newest first.
    async fn find_by_tag(&self, tag_id: i64, limit: u64) -> Result<Vec<Post>, RepoError>;

    /// Comment count per post, in a single grouped query.
    ///
    /// Every existing post in `ids` is present in the result, with zero when it
    /// has no comments.
    async fn count_comments_by_post_ids(
        &self,
        ids: &[i64],
    ) -> Result<HashMap<i64, u64>, RepoError>;

    async fn count_likes(&self, post_id: i64) -> Result<u64, RepoError>;
}

/// Tag repository.
///
/// Popularity is the number of related posts; ties keep id order.
#[async_trait]
pub trait TagRepository: BaseRepository<Tag, i64> {
    async fn find_by_title(&self, title: &str) -> Result<Option<Tag>, RepoError>;

    async fn find_popular(&self, limit: u64) -> Result<Vec<Tag>, RepoError>;

    /// Tags of many posts at once, keyed by post id. Posts without tags are absent.
    async fn find_by_post_ids(&self, ids: &[i64]) -> Result<HashMap<i64, Vec<Tag>>, RepoError>;

    /// Related post count per tag, in a single grouped query.
    async fn count_posts_by_tag_ids(&self, ids: &[i64])
    -> Result<HashMap<i64, u64>, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, i64> {
    /// Comments of a post, oldest first.
    async fn find_by_post(&self, post_id: i64) -> Result<Vec<Comment>, RepoError>;
}

/// User repository.
#[async_trait]
pub trait UserRepository: BaseRepository<User, i64> {
    async fn find_by_ids(&self, ids: &[i64]) -> Result<HashMap<i64, User>, RepoError>;
}
