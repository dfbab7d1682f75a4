//! # Scribe Infrastructure
//!
//! Concrete implementations of the ports defined in `scribe-core`.
//! This crate contains database, object storage, cache, and auth
//! integrations.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL database support via SeaORM

pub mod auth;
pub mod cache;
pub mod database;
pub mod memory;
pub mod storage;

// Re-exports - In-Memory
pub use cache::InMemoryCache;
pub use database::DatabaseConnections;
pub use memory::{
    MemoryArticleRepository, MemoryCategoryRepository, MemoryCommentRepository,
    MemoryUserRepository,
};
pub use storage::{LocalObjectStore, MemoryObjectStore};

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};

// Re-exports - Postgres
#[cfg(feature = "postgres")]
pub use database::{
    PostgresArticleRepository, PostgresCategoryRepository, PostgresCommentRepository,
    PostgresUserRepository,
};
