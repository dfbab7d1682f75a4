//! Filesystem-backed object store.

use std::path::PathBuf;

use async_trait::async_trait;

use scribe_core::ports::{ObjectStore, StorageError};

use super::public_url;

/// Object store writing under a media root on the local filesystem.
///
/// The public URL is the configured base joined with the object key; who
/// serves that base (reverse proxy, CDN) is a deployment concern, as with
/// the managed bucket this stands in for.
pub struct LocalObjectStore {
    root: PathBuf,
    public_base: String,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base: public_base.into(),
        }
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn put(
        &self,
        key: &str,
        _content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StorageError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;

        let path = self.root.join(key);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| StorageError::Write(e.to_string()))?;

        tracing::debug!(object_key = %key, "Stored media object");
        Ok(public_url(&self.public_base, key))
    }
}
