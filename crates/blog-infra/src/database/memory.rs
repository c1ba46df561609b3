//! In-memory blog store - used when no database is configured and in tests.
//!
//! Mirrors the relational constraints of the SQL schema: unique slugs, tag
//! titles and usernames, foreign keys, and cascading deletes from posts to
//! their comments, tag links and likes. Data is lost on process restart.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use blog_core::domain::{Comment, Post, Tag, User};
use blog_core::error::RepoError;
use blog_core::ports::{
    BaseRepository, CommentRepository, PostRepository, TagRepository, UserRepository,
};

#[derive(Default)]
struct StoreData {
    users: BTreeMap<i64, User>,
    posts: BTreeMap<i64, Post>,
    tags: BTreeMap<i64, Tag>,
    comments: BTreeMap<i64, Comment>,
    /// (post_id, tag_id)
    post_tags: BTreeSet<(i64, i64)>,
    /// (post_id, user_id)
    likes: BTreeSet<(i64, i64)>,
    last_id: i64,
}

impl StoreData {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn like_count(&self, post_id: i64) -> u64 {
        self.likes.range((post_id, i64::MIN)..=(post_id, i64::MAX)).count() as u64
    }

    fn tag_post_count(&self, tag_id: i64) -> u64 {
        self.post_tags.iter().filter(|(_, t)| *t == tag_id).count() as u64
    }

    fn remove_post(&mut self, id: i64) -> Option<Post> {
        let post = self.posts.remove(&id)?;
        self.comments.retain(|_, c| c.post_id != id);
        self.post_tags.retain(|(p, _)| *p != id);
        self.likes.retain(|(p, _)| *p != id);
        Some(post)
    }
}

/// Thread-safe in-memory implementation of every repository port.
///
/// A single id sequence is shared by all entity kinds.
pub struct InMemoryBlogStore {
    data: RwLock<StoreData>,
}

impl InMemoryBlogStore {
    pub fn new() -> Self {
        Self {
            data: RwLock::new(StoreData::default()),
        }
    }

    /// Attach a tag to a post. Attaching twice is a no-op.
    pub async fn tag_post(&self, post_id: i64, tag_id: i64) -> Result<(), RepoError> {
        let mut data = self.data.write().await;
        if !data.posts.contains_key(&post_id) || !data.tags.contains_key(&tag_id) {
            return Err(RepoError::Constraint(format!(
                "cannot link post {post_id} to tag {tag_id}: missing row"
            )));
        }
        data.post_tags.insert((post_id, tag_id));
        Ok(())
    }

    /// Record that a user likes a post. Liking twice is a no-op.
    pub async fn like_post(&self, post_id: i64, user_id: i64) -> Result<(), RepoError> {
        let mut data = self.data.write().await;
        if !data.posts.contains_key(&post_id) || !data.users.contains_key(&user_id) {
            return Err(RepoError::Constraint(format!(
                "cannot record like of post {post_id} by user {user_id}: missing row"
            )));
        }
        data.likes.insert((post_id, user_id));
        Ok(())
    }
}

impl Default for InMemoryBlogStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, i64> for InMemoryBlogStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        Ok(self.data.read().await.posts.get(&id).cloned())
    }

    async fn save(&self, mut post: Post) -> Result<Post, RepoError> {
        let mut data = self.data.write().await;

        if !data.users.contains_key(&post.author_id) {
            return Err(RepoError::Constraint(format!(
                "author {} does not exist",
                post.author_id
            )));
        }
        if data
            .posts
            .values()
            .any(|p| p.slug == post.slug && p.id != post.id)
        {
            return Err(RepoError::Constraint(format!(
                "slug '{}' already exists",
                post.slug
            )));
        }

        if post.is_persisted() {
            match data.posts.get(&post.id) {
                Some(existing) if existing.slug != post.slug => {
                    return Err(RepoError::Constraint(format!(
                        "slug of post {} cannot change",
                        post.id
                    )));
                }
                Some(_) => {}
                None => return Err(RepoError::NotFound),
            }
        } else {
            post.id = data.next_id();
        }

        data.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut data = self.data.write().await;
        data.remove_post(id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryBlogStore {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let data = self.data.read().await;
        Ok(data.posts.values().find(|p| p.slug == slug).cloned())
    }

    async fn find_popular(&self, limit: u64) -> Result<Vec<Post>, RepoError> {
        let data = self.data.read().await;
        // posts iterate in id order and the sort is stable
        let mut posts: Vec<&Post> = data.posts.values().collect();
        posts.sort_by_key(|p| Reverse(data.like_count(p.id)));
        Ok(posts
            .into_iter()
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn find_fresh(&self, limit: u64) -> Result<Vec<Post>, RepoError> {
        let data = self.data.read().await;
        let mut posts: Vec<&Post> = data.posts.values().collect();
        posts.sort_by_key(|p| Reverse(p.published_at));
        Ok(posts
            .into_iter()
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn find_by_tag(&self, tag_id: i64, limit: u64) -> Result<Vec<Post>, RepoError> {
        let data = self.data.read().await;
        let mut posts: Vec<&Post> = data
            .post_tags
            .iter()
            .filter(|(_, t)| *t == tag_id)
            .filter_map(|(p, _)| data.posts.get(p))
            .collect();
        posts.sort_by_key(|p| (Reverse(p.published_at), p.id));
        Ok(posts
            .into_iter()
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count_comments_by_post_ids(
        &self,
        ids: &[i64],
    ) -> Result<HashMap<i64, u64>, RepoError> {
        let data = self.data.read().await;
        let mut counts: HashMap<i64, u64> = ids
            .iter()
            .filter(|id| data.posts.contains_key(*id))
            .map(|id| (*id, 0))
            .collect();
        for comment in data.comments.values() {
            if let Some(count) = counts.get_mut(&comment.post_id) {
                *count += 1;
            }
        }
        Ok(counts)
    }

    async fn count_likes(&self, post_id: i64) -> Result<u64, RepoError> {
        Ok(self.data.read().await.like_count(post_id))
    }
}

#[async_trait]
impl BaseRepository<Tag, i64> for InMemoryBlogStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Tag>, RepoError> {
        Ok(self.data.read().await.tags.get(&id).cloned())
    }

    async fn save(&self, mut tag: Tag) -> Result<Tag, RepoError> {
        let mut data = self.data.write().await;

        if data
            .tags
            .values()
            .any(|t| t.title == tag.title && t.id != tag.id)
        {
            return Err(RepoError::Constraint(format!(
                "tag '{}' already exists",
                tag.title
            )));
        }

        if tag.id == 0 {
            tag.id = data.next_id();
        } else if !data.tags.contains_key(&tag.id) {
            return Err(RepoError::NotFound);
        }

        data.tags.insert(tag.id, tag.clone());
        Ok(tag)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut data = self.data.write().await;
        data.tags.remove(&id).ok_or(RepoError::NotFound)?;
        data.post_tags.retain(|(_, t)| *t != id);
        Ok(())
    }
}

#[async_trait]
impl TagRepository for InMemoryBlogStore {
    async fn find_by_title(&self, title: &str) -> Result<Option<Tag>, RepoError> {
        let data = self.data.read().await;
        Ok(data.tags.values().find(|t| t.title == title).cloned())
    }

    async fn find_popular(&self, limit: u64) -> Result<Vec<Tag>, RepoError> {
        let data = self.data.read().await;
        let mut tags: Vec<&Tag> = data.tags.values().collect();
        tags.sort_by_key(|t| Reverse(data.tag_post_count(t.id)));
        Ok(tags.into_iter().take(limit as usize).cloned().collect())
    }

    async fn find_by_post_ids(&self, ids: &[i64]) -> Result<HashMap<i64, Vec<Tag>>, RepoError> {
        let data = self.data.read().await;
        let mut tags_by_post: HashMap<i64, Vec<Tag>> = HashMap::new();
        for (post_id, tag_id) in &data.post_tags {
            if !ids.contains(post_id) {
                continue;
            }
            if let Some(tag) = data.tags.get(tag_id) {
                tags_by_post.entry(*post_id).or_default().push(tag.clone());
            }
        }
        Ok(tags_by_post)
    }

    async fn count_posts_by_tag_ids(
        &self,
        ids: &[i64],
    ) -> Result<HashMap<i64, u64>, RepoError> {
        let data = self.data.read().await;
        Ok(ids
            .iter()
            .filter(|id| data.tags.contains_key(*id))
            .map(|id| (*id, data.tag_post_count(*id)))
            .collect())
    }
}

#[async_trait]
impl BaseRepository<Comment, i64> for InMemoryBlogStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Comment>, RepoError> {
        Ok(self.data.read().await.comments.get(&id).cloned())
    }

    async fn save(&self, mut comment: Comment) -> Result<Comment, RepoError> {
        let mut data = self.data.write().await;

        if !data.posts.contains_key(&comment.post_id) {
            return Err(RepoError::Constraint(format!(
                "post {} does not exist",
                comment.post_id
            )));
        }
        if !data.users.contains_key(&comment.author_id) {
            return Err(RepoError::Constraint(format!(
                "author {} does not exist",
                comment.author_id
            )));
        }

        if comment.id == 0 {
            comment.id = data.next_id();
        } else if !data.comments.contains_key(&comment.id) {
            return Err(RepoError::NotFound);
        }

        data.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut data = self.data.write().await;
        data.comments
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl CommentRepository for InMemoryBlogStore {
    async fn find_by_post(&self, post_id: i64) -> Result<Vec<Comment>, RepoError> {
        let data = self.data.read().await;
        let mut comments: Vec<Comment> = data
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by_key(|c| (c.published_at, c.id));
        Ok(comments)
    }
}

#[async_trait]
impl BaseRepository<User, i64> for InMemoryBlogStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepoError> {
        Ok(self.data.read().await.users.get(&id).cloned())
    }

    async fn save(&self, mut user: User) -> Result<User, RepoError> {
        let mut data = self.data.write().await;

        if data
            .users
            .values()
            .any(|u| u.username == user.username && u.id != user.id)
        {
            return Err(RepoError::Constraint(format!(
                "username '{}' already exists",
                user.username
            )));
        }

        if user.id == 0 {
            user.id = data.next_id();
        } else if !data.users.contains_key(&user.id) {
            return Err(RepoError::NotFound);
        }

        data.users.insert(user.id, user.clone());
        Ok(user)
    }

    /// Removes the user together with their posts, comments and likes.
    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut data = self.data.write().await;
        data.users.remove(&id).ok_or(RepoError::NotFound)?;

        let owned: Vec<i64> = data
            .posts
            .values()
            .filter(|p| p.author_id == id)
            .map(|p| p.id)
            .collect();
        for post_id in owned {
            data.remove_post(post_id);
        }
        data.comments.retain(|_, c| c.author_id != id);
        data.likes.retain(|(_, u)| *u != id);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryBlogStore {
    async fn find_by_ids(&self, ids: &[i64]) -> Result<HashMap<i64, User>, RepoError> {
        let data = self.data.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| data.users.get(id).map(|u| (*id, u.clone())))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn author(store: &InMemoryBlogStore) -> User {
        store
            .save(User::new("alice".to_string(), "alice@example.com".to_string()))
            .await
            .unwrap()
    }

    fn post(author_id: i64, slug: &str) -> Post {
        Post::new(
            author_id,
            format!("Title of {slug}"),
            "Body".to_string(),
            slug.to_string(),
        )
    }

    #[tokio::test]
    async fn test_save_assigns_ids() {
        let store = InMemoryBlogStore::new();
        let alice = author(&store).await;
        let saved = store.save(post(alice.id, "first")).await.unwrap();

        assert!(saved.is_persisted());
        let found: Option<Post> = store.find_by_id(saved.id).await.unwrap();
        assert_eq!(found, Some(saved));
    }

    #[tokio::test]
    async fn test_duplicate_slug_rejected() {
        let store = InMemoryBlogStore::new();
        let alice = author(&store).await;
        store.save(post(alice.id, "same")).await.unwrap();

        let result = store.save(post(alice.id, "same")).await;
        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_slug_is_immutable() {
        let store = InMemoryBlogStore::new();
        let alice = author(&store).await;
        let mut saved = store.save(post(alice.id, "original")).await.unwrap();

        saved.title = "Retitled".to_string();
        let saved = store.save(saved).await.unwrap();
        assert_eq!(saved.title, "Retitled");

        let mut renamed = saved.clone();
        renamed.slug = "renamed".to_string();
        assert!(matches!(
            store.save(renamed).await,
            Err(RepoError::Constraint(_))
        ));
    }

    #[tokio::test]
    async fn test_post_requires_existing_author() {
        let store = InMemoryBlogStore::new();
        let result = store.save(post(42, "orphan")).await;
        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }

    #[tokio::test]
    async fn test_deleting_post_removes_comments_and_likes() {
        let store = InMemoryBlogStore::new();
        let alice = author(&store).await;
        let saved = store.save(post(alice.id, "doomed")).await.unwrap();
        let comment = store
            .save(Comment::new(saved.id, alice.id, "first!".to_string()))
            .await
            .unwrap();
        store.like_post(saved.id, alice.id).await.unwrap();

        BaseRepository::<Post, i64>::delete(&store, saved.id)
            .await
            .unwrap();

        let found: Option<Comment> = store.find_by_id(comment.id).await.unwrap();
        assert!(found.is_none());
        assert_eq!(store.count_likes(saved.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_like_twice_counts_once() {
        let store = InMemoryBlogStore::new();
        let alice = author(&store).await;
        let saved = store.save(post(alice.id, "liked")).await.unwrap();

        store.like_post(saved.id, alice.id).await.unwrap();
        store.like_post(saved.id, alice.id).await.unwrap();

        assert_eq!(store.count_likes(saved.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_count_comments_skips_unknown_ids() {
        let store = InMemoryBlogStore::new();
        let alice = author(&store).await;
        let saved = store.save(post(alice.id, "quiet")).await.unwrap();

        let counts = store
            .count_comments_by_post_ids(&[saved.id, 999])
            .await
            .unwrap();
        assert_eq!(counts, HashMap::from([(saved.id, 0)]));
    }
}
