//! Aggregation layer - batch-fetches entities and attaches derived counts.
//!
//! Every operation issues a fixed number of queries for the whole batch: ids are
//! collected up front, one grouped query returns the counts, and the results are
//! joined in memory. Nothing here queries per item.

use std::collections::{BTreeSet, HashMap};
use std::iter;
use std::sync::Arc;

use crate::domain::{
    CommentWithAuthor, Post, PostDetailView, PostSummary, PostWithComments, Tag, TagWithPosts,
    User,
};
use crate::error::DomainError;
use crate::ports::{CommentRepository, PostRepository, TagRepository, UserRepository};

/// Read-side service used by the page handlers.
#[derive(Clone)]
pub struct Aggregator {
    posts: Arc<dyn PostRepository>,
    tags: Arc<dyn TagRepository>,
    comments: Arc<dyn CommentRepository>,
    users: Arc<dyn UserRepository>,
}

impl Aggregator {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        tags: Arc<dyn TagRepository>,
        comments: Arc<dyn CommentRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            posts,
            tags,
            comments,
            users,
        }
    }

    /// Annotate each post with its comment count.
    pub async fn with_comment_counts(
        &self,
        posts: Vec<Post>,
    ) -> Result<Vec<PostWithComments>, DomainError> {
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let ids = unique_ids(posts.iter().map(|p| p.id));
        let counts = self.posts.count_comments_by_post_ids(&ids).await?;

        posts
            .into_iter()
            .map(|post| {
                let num_comments = count_for(&counts, post.id, "comment")?;
                Ok(PostWithComments { post, num_comments })
            })
            .collect()
    }

    /// Annotate each tag with the number of posts carrying it.
    pub async fn with_post_counts(
        &self,
        tags: Vec<Tag>,
    ) -> Result<Vec<TagWithPosts>, DomainError> {
        if tags.is_empty() {
            return Ok(Vec::new());
        }

        let ids = unique_ids(tags.iter().map(|t| t.id));
        let counts = self.tags.count_posts_by_tag_ids(&ids).await?;
        annotate_tags(tags, &counts)
    }

    pub async fn popular_posts(&self, limit: u64) -> Result<Vec<Post>, DomainError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        Ok(self.posts.find_popular(limit).await?)
    }

    pub async fn popular_tags(&self, limit: u64) -> Result<Vec<Tag>, DomainError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        Ok(self.tags.find_popular(limit).await?)
    }

    pub async fn fresh_posts(&self, limit: u64) -> Result<Vec<Post>, DomainError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        Ok(self.posts.find_fresh(limit).await?)
    }

    /// Tags of a single post with their counts, optionally in popularity order.
    pub async fn tags_for_post(
        &self,
        post: &Post,
        ordered_by_popularity: bool,
    ) -> Result<Vec<TagWithPosts>, DomainError> {
        let tags = self
            .tags
            .find_by_post_ids(&[post.id])
            .await?
            .remove(&post.id)
            .unwrap_or_default();

        let mut tags = self.with_post_counts(tags).await?;
        if ordered_by_popularity {
            sort_by_popularity(&mut tags);
        }
        Ok(tags)
    }

    pub async fn post_by_slug(&self, slug: &str) -> Result<Post, DomainError> {
        self.posts
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| DomainError::not_found("post", slug))
    }

    pub async fn tag_by_title(&self, title: &str) -> Result<Tag, DomainError> {
        self.tags
            .find_by_title(title)
            .await?
            .ok_or_else(|| DomainError::not_found("tag", title))
    }

    pub async fn posts_for_tag(&self, tag: &Tag, limit: u64) -> Result<Vec<Post>, DomainError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        Ok(self.posts.find_by_tag(tag.id, limit).await?)
    }

    /// Build listing data for a batch of posts.
    ///
    /// Four queries regardless of batch size: comment counts, authors, tags,
    /// and post counts for every tag seen in the batch.
    pub async fn summarize(&self, posts: Vec<Post>) -> Result<Vec<PostSummary>, DomainError> {
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let post_ids = unique_ids(posts.iter().map(|p| p.id));
        let author_ids = unique_ids(posts.iter().map(|p| p.author_id));

        let comment_counts = self.posts.count_comments_by_post_ids(&post_ids).await?;
        let authors = self.users.find_by_ids(&author_ids).await?;
        let tags_by_post = self.tags.find_by_post_ids(&post_ids).await?;

        let tag_ids = unique_ids(tags_by_post.values().flatten().map(|t| t.id));
        let tag_counts = if tag_ids.is_empty() {
            HashMap::new()
        } else {
            self.tags.count_posts_by_tag_ids(&tag_ids).await?
        };

        tracing::debug!(
            posts = posts.len(),
            authors = authors.len(),
            tags = tag_ids.len(),
            "Summarized post batch"
        );

        posts
            .into_iter()
            .map(|post| {
                let num_comments = count_for(&comment_counts, post.id, "comment")?;
                let author = user_for(&authors, post.author_id)?;
                let tags = tags_by_post.get(&post.id).cloned().unwrap_or_default();
                let mut tags = annotate_tags(tags, &tag_counts)?;
                sort_by_popularity(&mut tags);

                Ok(PostSummary {
                    post,
                    author,
                    num_comments,
                    tags,
                })
            })
            .collect()
    }

    /// Everything the post page shows, looked up by slug.
    pub async fn post_detail(&self, slug: &str) -> Result<PostDetailView, DomainError> {
        let post = self.post_by_slug(slug).await?;
        let comments = self.comments.find_by_post(post.id).await?;

        let user_ids = unique_ids(
            comments
                .iter()
                .map(|c| c.author_id)
                .chain(iter::once(post.author_id)),
        );
        let users = self.users.find_by_ids(&user_ids).await?;

        let author = user_for(&users, post.author_id)?;
        let comments = comments
            .into_iter()
            .map(|comment| {
                let author = user_for(&users, comment.author_id)?;
                Ok(CommentWithAuthor { comment, author })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        let num_likes = self.posts.count_likes(post.id).await?;
        let tags = self.tags_for_post(&post, true).await?;

        Ok(PostDetailView {
            post,
            author,
            comments,
            num_likes,
            tags,
        })
    }
}

fn unique_ids(ids: impl IntoIterator<Item = i64>) -> Vec<i64> {
    ids.into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// A batch result without a requested id means the query and the batch
/// disagree; that is a bug, not a zero.
fn count_for(counts: &HashMap<i64, u64>, id: i64, what: &str) -> Result<u64, DomainError> {
    counts.get(&id).copied().ok_or_else(|| {
        DomainError::Internal(format!("{what} count missing from batch result for id {id}"))
    })
}

fn user_for(users: &HashMap<i64, User>, id: i64) -> Result<User, DomainError> {
    users
        .get(&id)
        .cloned()
        .ok_or_else(|| DomainError::Internal(format!("user {id} missing from batch result")))
}

fn annotate_tags(
    tags: Vec<Tag>,
    counts: &HashMap<i64, u64>,
) -> Result<Vec<TagWithPosts>, DomainError> {
    tags.into_iter()
        .map(|tag| {
            let num_posts = count_for(counts, tag.id, "post")?;
            Ok(TagWithPosts { tag, num_posts })
        })
        .collect()
}

/// Most used tags first; equal counts keep id order.
fn sort_by_popularity(tags: &mut [TagWithPosts]) {
    tags.sort_by(|a, b| {
        b.num_posts
            .cmp(&a.num_posts)
            .then_with(|| a.tag.id.cmp(&b.tag.id))
    });
}
