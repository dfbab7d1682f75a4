use async_trait::async_trait;

/// Object store trait - abstraction over the managed file storage that
/// holds uploaded article images and serves them publicly.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store an object under `key` and return its publicly resolvable URL.
    /// Storing to an existing key overwrites it.
    async fn put(
        &self,
        key: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StorageError>;
}

/// Object storage errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Write failed: {0}")]
    Write(String),

    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),
}
