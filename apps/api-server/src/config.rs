//! Application configuration loaded from environment variables.

use std::env;

use uuid::Uuid;

use scribe_infra::database::DatabaseConfig;

/// Media storage settings.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory the local object store writes under.
    pub media_root: String,
    /// Base URL stored objects are resolvable at.
    pub public_base: String,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub storage: StorageConfig,
    /// Owner recorded for anonymous create requests. Stand-in for the
    /// not-yet-wired session on public posting paths; authenticated
    /// callers always take precedence.
    pub fallback_author: Uuid,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(100),
            min_connections: env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        });

        let storage = StorageConfig {
            media_root: env::var("MEDIA_ROOT").unwrap_or_else(|_| "media".to_string()),
            public_base: env::var("MEDIA_PUBLIC_BASE")
                .unwrap_or_else(|_| "http://127.0.0.1:8080/media".to_string()),
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database,
            storage,
            fallback_author: env::var("FALLBACK_AUTHOR_ID")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Uuid::nil()),
        }
    }
}
