//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod cache;
mod repository;
mod storage;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenService};
pub use cache::{Cache, CacheError};
pub use repository::{
    ArticleRepository, BaseRepository, CategoryRepository, CommentRepository, UserRepository,
};
pub use storage::{ObjectStore, StorageError};
