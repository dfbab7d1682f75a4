//! Application state - shared across all handlers.

use std::sync::Arc;

use scribe_core::ports::{
    ArticleRepository, Cache, CategoryRepository, CommentRepository, ObjectStore, UserRepository,
};
use scribe_infra::cache::InMemoryCache;
use scribe_infra::memory::{
    MemoryArticleRepository, MemoryCategoryRepository, MemoryCommentRepository,
    MemoryUserRepository,
};
use scribe_infra::storage::LocalObjectStore;

#[cfg(feature = "postgres")]
use scribe_infra::database::{
    DatabaseConnections, PostgresArticleRepository, PostgresCategoryRepository,
    PostgresCommentRepository, PostgresUserRepository,
};

use crate::config::AppConfig;

/// The repository ports, grouped so postgres and in-memory wiring build the
/// same bundle.
struct Repositories {
    articles: Arc<dyn ArticleRepository>,
    categories: Arc<dyn CategoryRepository>,
    comments: Arc<dyn CommentRepository>,
    users: Arc<dyn UserRepository>,
}

fn memory_repositories() -> Repositories {
    Repositories {
        articles: Arc::new(MemoryArticleRepository::new()),
        categories: Arc::new(MemoryCategoryRepository::new(Vec::new())),
        comments: Arc::new(MemoryCommentRepository::new()),
        users: Arc::new(MemoryUserRepository::new()),
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub articles: Arc<dyn ArticleRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub users: Arc<dyn UserRepository>,
    pub storage: Arc<dyn ObjectStore>,
    pub cache: Arc<dyn Cache>,
    /// Owner recorded for anonymous create requests.
    pub fallback_author: uuid::Uuid,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let cache: Arc<dyn Cache> = Arc::new(InMemoryCache::new());
        let storage: Arc<dyn ObjectStore> = Arc::new(LocalObjectStore::new(
            &config.storage.media_root,
            &config.storage.public_base,
        ));

        #[cfg(feature = "postgres")]
        let repos = {
            if let Some(db_config) = config.database.as_ref() {
                match DatabaseConnections::init(db_config).await {
                    Ok(connections) => {
                        let db = connections.main;
                        Repositories {
                            articles: Arc::new(PostgresArticleRepository::new(db.clone())),
                            categories: Arc::new(PostgresCategoryRepository::new(db.clone())),
                            comments: Arc::new(PostgresCommentRepository::new(db.clone())),
                            users: Arc::new(PostgresUserRepository::new(db)),
                        }
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                        memory_repositories()
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                memory_repositories()
            }
        };

        #[cfg(not(feature = "postgres"))]
        let repos = {
            tracing::info!("Running without postgres feature - using in-memory repositories");
            memory_repositories()
        };

        tracing::info!("Application state initialized");

        Self {
            articles: repos.articles,
            categories: repos.categories,
            comments: repos.comments,
            users: repos.users,
            storage,
            cache,
            fallback_author: config.fallback_author,
        }
    }
}
