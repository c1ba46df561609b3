//! PostgreSQL repository implementations.
//!
//! Counts are always grouped queries over the relation tables. Nothing is
//! denormalised onto the parent rows.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use blog_core::domain::{Comment, Post, Tag, User};
use blog_core::error::RepoError;
use blog_core::ports::{CommentRepository, PostRepository, TagRepository, UserRepository};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::like::{self, Entity as LikeEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::post_tag::{self, Entity as PostTagEntity};
use super::entity::tag::{self, Entity as TagEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, repo_error};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL tag repository.
pub type PostgresTagRepository = PostgresBaseRepository<TagEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

fn to_counts(rows: Vec<(i64, i64)>) -> HashMap<i64, u64> {
    rows.into_iter()
        .map(|(id, count)| (id, count.max(0) as u64))
        .collect()
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        tracing::debug!(slug = %slug, "Finding post by slug");

        let result = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .one(self.conn())
            .await
            .map_err(repo_error)?;

        Ok(result.map(Into::into))
    }

    async fn find_popular(&self, limit: u64) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .left_join(LikeEntity)
            .group_by(post::Column::Id)
            .order_by_desc(Expr::col((LikeEntity, like::Column::UserId)).count())
            .order_by_asc(post::Column::Id)
            .limit(limit)
            .all(self.conn())
            .await
            .map_err(repo_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_fresh(&self, limit: u64) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .order_by_desc(post::Column::PublishedAt)
            .order_by_asc(post::Column::Id)
            .limit(limit)
            .all(self.conn())
            .await
            .map_err(repo_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_tag(&self, tag_id: i64, limit: u64) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .inner_join(PostTagEntity)
            .filter(post_tag::Column::TagId.eq(tag_id))
            .order_by_desc(post::Column::PublishedAt)
            .order_by_asc(post::Column::Id)
            .limit(limit)
            .all(self.conn())
            .await
            .map_err(repo_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn count_comments_by_post_ids(
        &self,
        ids: &[i64],
    ) -> Result<HashMap<i64, u64>, RepoError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(i64, i64)> = PostEntity::find()
            .select_only()
            .column(post::Column::Id)
            .column_as(
                Expr::col((CommentEntity, comment::Column::Id)).count(),
                "num_comments",
            )
            .left_join(CommentEntity)
            .filter(post::Column::Id.is_in(ids.iter().copied()))
            .group_by(post::Column::Id)
            .into_tuple()
            .all(self.conn())
            .await
            .map_err(repo_error)?;

        Ok(to_counts(rows))
    }

    async fn count_likes(&self, post_id: i64) -> Result<u64, RepoError> {
        LikeEntity::find()
            .filter(like::Column::PostId.eq(post_id))
            .count(self.conn())
            .await
            .map_err(repo_error)
    }
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn find_by_title(&self, title: &str) -> Result<Option<Tag>, RepoError> {
        tracing::debug!(title = %title, "Finding tag by title");

        let result = TagEntity::find()
            .filter(tag::Column::Title.eq(title))
            .one(self.conn())
            .await
            .map_err(repo_error)?;

        Ok(result.map(Into::into))
    }

    async fn find_popular(&self, limit: u64) -> Result<Vec<Tag>, RepoError> {
        let result = TagEntity::find()
            .left_join(PostTagEntity)
            .group_by(tag::Column::Id)
            .order_by_desc(Expr::col((PostTagEntity, post_tag::Column::PostId)).count())
            .order_by_asc(tag::Column::Id)
            .limit(limit)
            .all(self.conn())
            .await
            .map_err(repo_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_post_ids(&self, ids: &[i64]) -> Result<HashMap<i64, Vec<Tag>>, RepoError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = PostTagEntity::find()
            .filter(post_tag::Column::PostId.is_in(ids.iter().copied()))
            .order_by_asc(post_tag::Column::TagId)
            .find_also_related(TagEntity)
            .all(self.conn())
            .await
            .map_err(repo_error)?;

        let mut tags_by_post: HashMap<i64, Vec<Tag>> = HashMap::new();
        for (link, tag) in rows {
            if let Some(tag) = tag {
                tags_by_post
                    .entry(link.post_id)
                    .or_default()
                    .push(tag.into());
            }
        }

        Ok(tags_by_post)
    }

    async fn count_posts_by_tag_ids(
        &self,
        ids: &[i64],
    ) -> Result<HashMap<i64, u64>, RepoError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(i64, i64)> = TagEntity::find()
            .select_only()
            .column(tag::Column::Id)
            .column_as(
                Expr::col((PostTagEntity, post_tag::Column::PostId)).count(),
                "num_posts",
            )
            .left_join(PostTagEntity)
            .filter(tag::Column::Id.is_in(ids.iter().copied()))
            .group_by(tag::Column::Id)
            .into_tuple()
            .all(self.conn())
            .await
            .map_err(repo_error)?;

        Ok(to_counts(rows))
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn find_by_post(&self, post_id: i64) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::PublishedAt)
            .order_by_asc(comment::Column::Id)
            .all(self.conn())
            .await
            .map_err(repo_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_ids(&self, ids: &[i64]) -> Result<HashMap<i64, User>, RepoError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let result = UserEntity::find()
            .filter(user::Column::Id.is_in(ids.iter().copied()))
            .all(self.conn())
            .await
            .map_err(repo_error)?;

        Ok(result
            .into_iter()
            .map(|model| (model.id, User::from(model)))
            .collect())
    }
}
