use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use sea_orm::{DatabaseBackend, EntityTrait, MockDatabase, MockExecResult, Transaction, Value};

use blog_core::Aggregator;
use blog_core::domain::{Post, Tag};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, PostRepository, TagRepository, UserRepository};

use crate::database::entity::{post, tag, user};
use crate::database::BlogRepositories;
use crate::database::postgres_base::PostgresBaseRepository;
use crate::database::postgres_repo::{
    PostgresCommentRepository, PostgresPostRepository, PostgresTagRepository,
    PostgresUserRepository,
};

fn post_model(id: i64, slug: &str) -> post::Model {
    post::Model {
        id,
        title: "Hello World".to_owned(),
        text: "Content".to_owned(),
        slug: slug.to_owned(),
        published_at: chrono::Utc::now().into(),
        image: None,
        author_id: 7,
    }
}

fn user_model(id: i64, username: &str) -> user::Model {
    user::Model {
        id,
        username: username.to_owned(),
        email: format!("{username}@example.com"),
        created_at: chrono::Utc::now().into(),
    }
}

/// Statements a repository sent to its mock connection.
fn transaction_log<E: EntityTrait>(repo: PostgresBaseRepository<E>) -> Vec<Transaction> {
    Arc::into_inner(repo.db)
        .expect("connection should no longer be shared")
        .into_transaction_log()
}

fn count_row(id: i64, alias: &'static str, count: i64) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("id", Value::from(id)), (alias, Value::from(count))])
}

#[tokio::test]
async fn test_find_post_by_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[post_model(1, "hello-world")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(1).await.unwrap();

    let post = result.expect("post should be found");
    assert_eq!(post.title, "Hello World");
    assert_eq!(post.slug, "hello-world");
    assert_eq!(post.author_id, 7);
}

#[tokio::test]
async fn test_find_post_by_missing_slug() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    assert!(repo.find_by_slug("does-not-exist").await.unwrap().is_none());
}

#[tokio::test]
async fn test_count_comments_single_grouped_query() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![
            count_row(1, "num_comments", 3),
            count_row(2, "num_comments", 0),
        ]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let counts = repo.count_comments_by_post_ids(&[1, 2]).await.unwrap();

    assert_eq!(counts, HashMap::from([(1, 3), (2, 0)]));

    let log = transaction_log(repo);
    assert_eq!(log.len(), 1);
    let sql = format!("{:?}", log[0]);
    assert!(sql.contains("GROUP BY"));
    assert!(sql.contains("COUNT"));
}

#[tokio::test]
async fn test_count_comments_empty_input_skips_query() {
    // No query results are queued: any query would fail.
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let repo = PostgresPostRepository::new(db);

    let counts = repo.count_comments_by_post_ids(&[]).await.unwrap();
    assert!(counts.is_empty());
}

#[tokio::test]
async fn test_count_posts_by_tag_ids() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![
            count_row(10, "num_posts", 5),
            count_row(11, "num_posts", 2),
        ]])
        .into_connection();

    let repo = PostgresTagRepository::new(db);
    let counts = repo.count_posts_by_tag_ids(&[10, 11]).await.unwrap();

    assert_eq!(counts, HashMap::from([(10, 5), (11, 2)]));
}

/// A joined `post_tags` + `tags` row as `find_also_related` selects it.
fn tag_link_row(post_id: i64, tag_id: i64, title: &str) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([
        ("A_post_id", Value::from(post_id)),
        ("A_tag_id", Value::from(tag_id)),
        ("B_id", Value::from(tag_id)),
        ("B_title", Value::from(title.to_owned())),
    ])
}

#[tokio::test]
async fn test_tags_grouped_by_post() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![
            tag_link_row(1, 10, "python"),
            tag_link_row(1, 11, "django"),
            tag_link_row(2, 10, "python"),
        ]])
        .into_connection();

    let repo = PostgresTagRepository::new(db);
    let tags = repo.find_by_post_ids(&[1, 2]).await.unwrap();

    let titles = |post_id: i64| -> Vec<String> {
        tags[&post_id].iter().map(|t| t.title.clone()).collect()
    };
    assert_eq!(titles(1), vec!["python", "django"]);
    assert_eq!(titles(2), vec!["python"]);
}

#[tokio::test]
async fn test_find_users_by_ids() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[user_model(7, "alice")]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);
    let users = repo.find_by_ids(&[7]).await.unwrap();

    assert_eq!(users[&7].username, "alice");
}

#[tokio::test]
async fn test_save_new_tag_inserts() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[tag::Model {
            id: 3,
            title: "rust".to_owned(),
        }]])
        .into_connection();

    let repo = PostgresTagRepository::new(db);
    let saved: Tag = repo.save(Tag::new("rust")).await.unwrap();

    assert_eq!(saved.id, 3);
    assert_eq!(saved.title, "rust");
}

#[tokio::test]
async fn test_delete_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let result = BaseRepository::<Post, i64>::delete(&repo, 404).await;

    assert!(matches!(result, Err(RepoError::NotFound)));
}

/// Runs `summarize` over `n` posts, all by the same author and all tagged
/// `python`, and returns how many statements each connection received.
async fn summarize_statements(n: i64) -> (usize, usize, usize) {
    let posts_db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([(1..=n)
            .map(|id| count_row(id, "num_comments", id % 3))
            .collect::<Vec<_>>()])
        .into_connection();
    let tags_db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([(1..=n)
            .map(|id| tag_link_row(id, 10, "python"))
            .collect::<Vec<_>>()])
        .append_query_results([[count_row(10, "num_posts", n)]])
        .into_connection();
    let users_db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[user_model(7, "alice")]])
        .into_connection();
    let comments_db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let posts = Arc::new(PostgresPostRepository::new(posts_db));
    let tags = Arc::new(PostgresTagRepository::new(tags_db));
    let users = Arc::new(PostgresUserRepository::new(users_db));
    let comments = Arc::new(PostgresCommentRepository::new(comments_db));

    let aggregator = Aggregator::new(posts.clone(), tags.clone(), comments, users.clone());
    let batch: Vec<Post> = (1..=n)
        .map(|id| post_model(id, &format!("post-{id}")).into())
        .collect();

    let summaries = aggregator.summarize(batch).await.unwrap();
    assert_eq!(summaries.len(), n as usize);
    for summary in &summaries {
        assert_eq!(summary.num_comments, (summary.post.id % 3) as u64);
        assert_eq!(summary.author.username, "alice");
        assert_eq!(summary.tags[0].num_posts, n as u64);
    }
    drop(aggregator);

    (
        transaction_log(Arc::into_inner(posts).expect("aggregator dropped")).len(),
        transaction_log(Arc::into_inner(tags).expect("aggregator dropped")).len(),
        transaction_log(Arc::into_inner(users).expect("aggregator dropped")).len(),
    )
}

#[tokio::test]
async fn test_summarize_query_count_independent_of_batch_size() {
    // comment counts, then tag prefetch + tag counts, then authors
    assert_eq!(summarize_statements(1).await, (1, 2, 1));
    assert_eq!(summarize_statements(12).await, (1, 2, 1));
}

#[tokio::test]
async fn test_postgres_bundle_shares_one_connection() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[post_model(1, "hello-world")]])
        .append_query_results([[tag::Model {
            id: 10,
            title: "python".to_owned(),
        }]])
        .into_connection();

    let repos = BlogRepositories::postgres(db);
    let aggregator = repos.aggregator();

    let post = aggregator.post_by_slug("hello-world").await.unwrap();
    let tag = aggregator.tag_by_title("python").await.unwrap();

    assert_eq!(post.id, 1);
    assert_eq!(tag.title, "python");
}
