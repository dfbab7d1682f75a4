//! In-memory repositories.
//!
//! Used as the fallback when `DATABASE_URL` is not configured and as the
//! store behind the handler tests. Data is lost on process restart.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use scribe_core::domain::{Article, Category, Comment, NewArticle, NewComment, User};
use scribe_core::error::RepoError;
use scribe_core::ports::{
    ArticleRepository, BaseRepository, CategoryRepository, CommentRepository, UserRepository,
};

/// In-memory article repository.
pub struct MemoryArticleRepository {
    rows: RwLock<HashMap<i64, Article>>,
    next_id: AtomicI64,
}

impl MemoryArticleRepository {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for MemoryArticleRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Article, i64> for MemoryArticleRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Article>, RepoError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        match self.rows.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl ArticleRepository for MemoryArticleRepository {
    async fn create(&self, draft: NewArticle) -> Result<Article, RepoError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let article = draft.into_article(id, Utc::now());
        self.rows.write().await.insert(id, article.clone());
        Ok(article)
    }

    async fn update(&self, article: Article) -> Result<Article, RepoError> {
        let mut rows = self.rows.write().await;
        if !rows.contains_key(&article.id) {
            return Err(RepoError::NotFound);
        }
        rows.insert(article.id, article.clone());
        Ok(article)
    }

    async fn list_recent(&self) -> Result<Vec<Article>, RepoError> {
        let mut all: Vec<Article> = self.rows.read().await.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(all)
    }
}

/// In-memory category repository, seeded at construction.
pub struct MemoryCategoryRepository {
    rows: Vec<Category>,
}

impl MemoryCategoryRepository {
    pub fn new(mut rows: Vec<Category>) -> Self {
        rows.sort_by_key(|c| c.id);
        Self { rows }
    }
}

#[async_trait]
impl BaseRepository<Category, i64> for MemoryCategoryRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, RepoError> {
        Ok(self.rows.iter().find(|c| c.id == id).cloned())
    }

    async fn delete(&self, _id: i64) -> Result<(), RepoError> {
        // Categories are read-only; nothing deletes them.
        Err(RepoError::Constraint("categories are read-only".to_string()))
    }
}

#[async_trait]
impl CategoryRepository for MemoryCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, RepoError> {
        Ok(self.rows.clone())
    }
}

/// In-memory comment repository.
pub struct MemoryCommentRepository {
    rows: RwLock<HashMap<i64, Comment>>,
    next_id: AtomicI64,
}

impl MemoryCommentRepository {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for MemoryCommentRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Comment, i64> for MemoryCommentRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Comment>, RepoError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        match self.rows.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl CommentRepository for MemoryCommentRepository {
    async fn create(&self, draft: NewComment) -> Result<Comment, RepoError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let comment = draft.into_comment(id, Utc::now());
        self.rows.write().await.insert(id, comment.clone());
        Ok(comment)
    }

    async fn list_for_post(&self, post_id: i64) -> Result<Vec<Comment>, RepoError> {
        let mut matching: Vec<Comment> = self
            .rows
            .read()
            .await
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(matching)
    }
}

/// In-memory user repository.
pub struct MemoryUserRepository {
    rows: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for MemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        match self.rows.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, RepoError> {
        let mut rows = self.rows.write().await;
        if rows.values().any(|u| u.email == user.email) {
            return Err(RepoError::Constraint("entity already exists".to_string()));
        }
        rows.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .rows
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(user_id: Uuid, content: &str) -> NewArticle {
        NewArticle::new(
            user_id,
            1,
            None,
            content.to_string(),
            "https://media.example/x.png".to_string(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn articles_get_sequential_ids() {
        let repo = MemoryArticleRepository::new();
        let author = Uuid::new_v4();
        let first = repo.create(draft(author, "one")).await.unwrap();
        let second = repo.create(draft(author, "two")).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn list_recent_is_newest_first() {
        let repo = MemoryArticleRepository::new();
        let author = Uuid::new_v4();
        repo.create(draft(author, "one")).await.unwrap();
        repo.create(draft(author, "two")).await.unwrap();
        repo.create(draft(author, "three")).await.unwrap();

        let listed = repo.list_recent().await.unwrap();
        let ids: Vec<i64> = listed.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn update_of_missing_row_is_not_found() {
        let repo = MemoryArticleRepository::new();
        let ghost = draft(Uuid::new_v4(), "ghost").into_article(99, Utc::now());
        assert!(matches!(
            repo.update(ghost).await,
            Err(RepoError::NotFound)
        ));
    }

    #[tokio::test]
    async fn comments_list_only_their_post_newest_first() {
        let repo = MemoryCommentRepository::new();
        let author = Uuid::new_v4();
        repo.create(NewComment::new(1, author, "a").unwrap())
            .await
            .unwrap();
        repo.create(NewComment::new(2, author, "b").unwrap())
            .await
            .unwrap();
        repo.create(NewComment::new(1, author, "c").unwrap())
            .await
            .unwrap();

        let listed = repo.list_for_post(1).await.unwrap();
        let bodies: Vec<&str> = listed.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(bodies, vec!["c", "a"]);
    }

    #[tokio::test]
    async fn duplicate_email_is_a_constraint_violation() {
        let repo = MemoryUserRepository::new();
        repo.create(User::new("a@b.c".to_string(), "hash".to_string()))
            .await
            .unwrap();
        let dup = repo
            .create(User::new("a@b.c".to_string(), "hash2".to_string()))
            .await;
        assert!(matches!(dup, Err(RepoError::Constraint(_))));
    }
}
