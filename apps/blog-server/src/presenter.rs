//! Presentation mapper - turns annotated domain views into render-ready DTOs.
//!
//! Pure projection: nothing here touches storage. Counts and tag order must
//! already be attached by the aggregation layer.

use blog_core::domain::{CommentWithAuthor, PostDetailView, PostSummary, TagWithPosts};
use blog_shared::dto::{CommentView, PostCard, PostDetail, TagBadge};

/// Number of characters shown in a post teaser.
pub const TEASER_LENGTH: usize = 200;

/// First [`TEASER_LENGTH`] characters of `text`, or all of it when shorter.
pub fn teaser(text: &str) -> String {
    text.chars().take(TEASER_LENGTH).collect()
}

pub fn tag_badge(tag: TagWithPosts) -> TagBadge {
    TagBadge {
        title: tag.tag.title,
        posts_with_tag: tag.num_posts,
    }
}

fn comment_view(comment: CommentWithAuthor) -> CommentView {
    CommentView {
        text: comment.comment.text,
        published_at: comment.comment.published_at,
        author: comment.author.username,
    }
}

#[derive(Debug, Clone)]
pub struct Presenter {
    media_url: String,
}

impl Presenter {
    pub fn new(media_url: impl Into<String>) -> Self {
        Self {
            media_url: media_url.into(),
        }
    }

    /// Public URL of a stored image. Absolute URLs pass through untouched.
    pub fn image_url(&self, image: Option<&str>) -> Option<String> {
        let path = image.filter(|p| !p.is_empty())?;
        if path.starts_with("http://") || path.starts_with("https://") {
            return Some(path.to_string());
        }
        Some(format!(
            "{}/{}",
            self.media_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        ))
    }

    pub fn post_card(&self, summary: PostSummary) -> PostCard {
        let first_tag_title = summary.first_tag_title().map(str::to_string);
        let PostSummary {
            post,
            author,
            num_comments,
            tags,
        } = summary;

        PostCard {
            teaser_text: teaser(&post.text),
            image_url: self.image_url(post.image.as_deref()),
            title: post.title,
            author: author.username,
            comments_amount: num_comments,
            published_at: post.published_at,
            slug: post.slug,
            tags: tags.into_iter().map(tag_badge).collect(),
            first_tag_title,
        }
    }

    pub fn post_detail(&self, view: PostDetailView) -> PostDetail {
        let PostDetailView {
            post,
            author,
            comments,
            num_likes,
            tags,
        } = view;

        PostDetail {
            image_url: self.image_url(post.image.as_deref()),
            title: post.title,
            text: post.text,
            author: author.username,
            comments: comments.into_iter().map(comment_view).collect(),
            likes_amount: num_likes,
            published_at: post.published_at,
            slug: post.slug,
            tags: tags.into_iter().map(tag_badge).collect(),
        }
    }
}
