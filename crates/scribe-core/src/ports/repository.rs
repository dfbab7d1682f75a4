use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Article, Category, Comment, NewArticle, NewComment, User};
use crate::error::RepoError;

/// Generic repository trait for operations every collection supports.
///
/// Creation is deliberately not here: article and comment ids are assigned
/// by the store, so each repository exposes its own `create` taking a
/// validated draft instead of a generic upsert.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Delete an entity by its ID. Fails with `RepoError::NotFound` when
    /// no row matched.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Article repository.
#[async_trait]
pub trait ArticleRepository: BaseRepository<Article, i64> {
    /// Insert a new article and return the stored row (with its assigned
    /// id and timestamps).
    async fn create(&self, draft: NewArticle) -> Result<Article, RepoError>;

    /// Persist an edited article row. The caller has already stamped
    /// `updated_at`.
    async fn update(&self, article: Article) -> Result<Article, RepoError>;

    /// All articles, newest first.
    async fn list_recent(&self) -> Result<Vec<Article>, RepoError>;
}

/// Category repository. Categories are read-only here.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, i64> {
    /// All categories, ordered by id ascending.
    async fn list(&self) -> Result<Vec<Category>, RepoError>;
}

/// Comment repository. Comments are append-only.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, i64> {
    async fn create(&self, draft: NewComment) -> Result<Comment, RepoError>;

    /// Comments on one article, newest first.
    async fn list_for_post(&self, post_id: i64) -> Result<Vec<Comment>, RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    async fn create(&self, user: User) -> Result<User, RepoError>;

    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}
