//! Bundles one implementation of every repository port.

use std::sync::Arc;

use blog_core::Aggregator;
use blog_core::ports::{CommentRepository, PostRepository, TagRepository, UserRepository};

use super::memory::InMemoryBlogStore;

#[cfg(feature = "postgres")]
use super::postgres_repo::{
    PostgresCommentRepository, PostgresPostRepository, PostgresTagRepository,
    PostgresUserRepository,
};

/// The repositories backing one storage engine.
#[derive(Clone)]
pub struct BlogRepositories {
    pub posts: Arc<dyn PostRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl BlogRepositories {
    /// All ports served by one shared in-memory store.
    pub fn in_memory(store: Arc<InMemoryBlogStore>) -> Self {
        Self {
            posts: store.clone(),
            tags: store.clone(),
            comments: store.clone(),
            users: store,
        }
    }

    /// All ports served by SeaORM over one shared connection pool.
    #[cfg(feature = "postgres")]
    pub fn postgres(db: sea_orm::DbConn) -> Self {
        let db = Arc::new(db);
        Self {
            posts: Arc::new(PostgresPostRepository::shared(db.clone())),
            tags: Arc::new(PostgresTagRepository::shared(db.clone())),
            comments: Arc::new(PostgresCommentRepository::shared(db.clone())),
            users: Arc::new(PostgresUserRepository::shared(db)),
        }
    }

    pub fn aggregator(&self) -> Aggregator {
        Aggregator::new(
            self.posts.clone(),
            self.tags.clone(),
            self.comments.clone(),
            self.users.clone(),
        )
    }
}
