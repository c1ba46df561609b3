//! Page handlers. Each returns the JSON context of one public page.

use actix_web::{HttpResponse, web};
use blog_shared::dto::{ContactsPage, HomePage, PostCard, PostPage, TagBadge, TagPage};

use crate::middleware::error::AppResult;
use crate::presenter::tag_badge;
use crate::state::AppState;

/// GET /
pub async fn index(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let most_popular_posts = popular_post_cards(&state).await?;
    let fresh = state.aggregator.fresh_posts(state.pages.sidebar).await?;
    let page_posts = post_cards(&state, fresh).await?;
    let popular_tags = popular_tag_badges(&state).await?;

    Ok(HttpResponse::Ok().json(HomePage {
        most_popular_posts,
        page_posts,
        popular_tags,
    }))
}

/// GET /posts/{slug}/
pub async fn post_detail(
    state: web::Data<AppState>,
    slug: web::Path<String>,
) -> AppResult<HttpResponse> {
    let slug = slug.into_inner();
    let view = state.aggregator.post_detail(&slug).await?;
    let post = state.presenter.post_detail(view);

    Ok(HttpResponse::Ok().json(PostPage {
        post,
        popular_tags: popular_tag_badges(&state).await?,
        most_popular_posts: popular_post_cards(&state).await?,
    }))
}

/// GET /tags/{title}/
pub async fn tag_filter(
    state: web::Data<AppState>,
    title: web::Path<String>,
) -> AppResult<HttpResponse> {
    let title = title.into_inner();
    let tag = state.aggregator.tag_by_title(&title).await?;
    let related = state
        .aggregator
        .posts_for_tag(&tag, state.pages.tag_posts)
        .await?;
    let posts = post_cards(&state, related).await?;

    Ok(HttpResponse::Ok().json(TagPage {
        tag: tag.title,
        popular_tags: popular_tag_badges(&state).await?,
        posts,
        most_popular_posts: popular_post_cards(&state).await?,
    }))
}

/// GET /contacts/
pub async fn contacts() -> HttpResponse {
    HttpResponse::Ok().json(ContactsPage::default())
}

async fn popular_post_cards(state: &AppState) -> AppResult<Vec<PostCard>> {
    let posts = state.aggregator.popular_posts(state.pages.sidebar).await?;
    post_cards(state, posts).await
}

async fn post_cards(
    state: &AppState,
    posts: Vec<blog_core::domain::Post>,
) -> AppResult<Vec<PostCard>> {
    let summaries = state.aggregator.summarize(posts).await?;
    Ok(summaries
        .into_iter()
        .map(|summary| state.presenter.post_card(summary))
        .collect())
}

async fn popular_tag_badges(state: &AppState) -> AppResult<Vec<TagBadge>> {
    let tags = state.aggregator.popular_tags(state.pages.sidebar).await?;
    let counted = state.aggregator.with_post_counts(tags).await?;
    Ok(counted.into_iter().map(tag_badge).collect())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test};
    use blog_core::domain::{Comment, Post, Tag, User};
    use blog_core::ports::{BaseRepository, PostRepository};
    use blog_infra::{BlogRepositories, InMemoryBlogStore};
    use chrono::{Duration, TimeZone, Utc};

    use super::*;
    use crate::config::PageLimits;
    use crate::handlers::configure_routes;
    use crate::presenter::Presenter;

    /// 25 posts tagged `rust`; `hello-world` also carries `python` and `django`.
    async fn seeded_store() -> Arc<InMemoryBlogStore> {
        let store = Arc::new(InMemoryBlogStore::new());
        let author = store
            .save(User::new("alice".to_string(), "alice@example.com".to_string()))
            .await
            .unwrap();
        let rust = store.save(Tag::new("rust")).await.unwrap();
        let python = store.save(Tag::new("python")).await.unwrap();
        let django = store.save(Tag::new("django")).await.unwrap();

        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        for i in 0..25 {
            let slug = format!("post-{i}");
            let post = store
                .save(
                    Post::new(author.id, format!("Post {i}"), "x".repeat(300), slug)
                        .published_at(start + Duration::hours(i)),
                )
                .await
                .unwrap();
            store.tag_post(post.id, rust.id).await.unwrap();
            if i < 4 {
                store.tag_post(post.id, python.id).await.unwrap();
            }
            if i == 0 {
                store.tag_post(post.id, django.id).await.unwrap();
            }
        }

        let hello = store
            .save(
                Post::new(
                    author.id,
                    "Hello world".to_string(),
                    "First post".to_string(),
                    "hello-world".to_string(),
                )
                .published_at(start - Duration::days(1)),
            )
            .await
            .unwrap();
        store.tag_post(hello.id, python.id).await.unwrap();
        store.tag_post(hello.id, django.id).await.unwrap();
        for text in ["Nice", "Thanks"] {
            store
                .save(Comment::new(hello.id, author.id, text.to_string()))
                .await
                .unwrap();
        }
        store.like_post(hello.id, author.id).await.unwrap();

        store
    }

    fn state(store: Arc<InMemoryBlogStore>) -> AppState {
        AppState::from_repositories(
            BlogRepositories::in_memory(store),
            Presenter::new("/media/"),
            PageLimits::default(),
        )
    }

    macro_rules! app {
        ($store:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(state($store)))
                    .configure(configure_routes),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_home_page_sections_are_capped() {
        let app = app!(seeded_store().await);

        let req = test::TestRequest::get().uri("/").to_request();
        let page: HomePage = test::call_and_read_body_json(&app, req).await;

        assert_eq!(page.most_popular_posts.len(), 5);
        assert_eq!(page.page_posts.len(), 5);
        assert_eq!(page.popular_tags.len(), 3);
        assert_eq!(page.page_posts[0].slug, "post-24");
        assert_eq!(page.page_posts[0].teaser_text.chars().count(), 200);
        assert_eq!(page.most_popular_posts[0].slug, "hello-world");
        assert_eq!(page.popular_tags[0].title, "rust");
        assert_eq!(page.popular_tags[0].posts_with_tag, 25);
    }

    #[actix_web::test]
    async fn test_post_page() {
        let app = app!(seeded_store().await);

        let req = test::TestRequest::get().uri("/posts/hello-world/").to_request();
        let page: PostPage = test::call_and_read_body_json(&app, req).await;

        assert_eq!(page.post.title, "Hello world");
        assert_eq!(page.post.author, "alice");
        assert_eq!(page.post.likes_amount, 1);
        assert_eq!(page.post.comments.len(), 2);
        assert_eq!(page.post.comments[0].text, "Nice");
        let tags: Vec<_> = page.post.tags.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(tags, ["python", "django"]);
        assert_eq!(page.post.tags[0].posts_with_tag, 5);
        assert_eq!(page.post.tags[1].posts_with_tag, 2);
        assert_eq!(page.most_popular_posts.len(), 5);
    }

    #[actix_web::test]
    async fn test_unknown_post_is_404_without_writes() {
        let store = seeded_store().await;
        let before = store.find_fresh(100).await.unwrap();
        let app = app!(store.clone());

        let req = test::TestRequest::get()
            .uri("/posts/does-not-exist/")
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(store.find_fresh(100).await.unwrap(), before);
    }

    #[actix_web::test]
    async fn test_tag_page_is_capped() {
        let app = app!(seeded_store().await);

        let req = test::TestRequest::get().uri("/tags/rust/").to_request();
        let page: TagPage = test::call_and_read_body_json(&app, req).await;

        assert_eq!(page.tag, "rust");
        assert_eq!(page.posts.len(), 20);
        assert_eq!(page.posts[0].slug, "post-24");
        assert!(page.posts.iter().all(|p| p.tags.iter().any(|t| t.title == "rust")));
        assert_eq!(page.popular_tags.len(), 3);
    }

    #[actix_web::test]
    async fn test_unknown_tag_is_404() {
        let app = app!(seeded_store().await);

        let req = test::TestRequest::get().uri("/tags/cobol/").to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_contacts_page_is_empty() {
        let app = app!(Arc::new(InMemoryBlogStore::new()));

        let req = test::TestRequest::get().uri("/contacts/").to_request();
        let body = test::call_and_read_body(&app, req).await;

        assert_eq!(body.as_ref(), b"{}");
    }

    #[actix_web::test]
    async fn test_empty_store_home_page() {
        let app = app!(Arc::new(InMemoryBlogStore::new()));

        let req = test::TestRequest::get().uri("/").to_request();
        let page: HomePage = test::call_and_read_body_json(&app, req).await;

        assert!(page.most_popular_posts.is_empty());
        assert!(page.page_posts.is_empty());
        assert!(page.popular_tags.is_empty());
    }
}
