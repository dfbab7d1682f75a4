//! In-memory object store - test double for the managed bucket.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use scribe_core::ports::{ObjectStore, StorageError};

use super::public_url;

struct StoredObject {
    content_type: String,
    bytes: Vec<u8>,
}

/// In-memory object store keeping uploads in a map.
pub struct MemoryObjectStore {
    objects: RwLock<HashMap<String, StoredObject>>,
    public_base: String,
}

impl MemoryObjectStore {
    pub fn new(public_base: impl Into<String>) -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
            public_base: public_base.into(),
        }
    }

    /// Number of stored objects.
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }

    /// Content type recorded for `key`, if stored.
    pub async fn content_type_of(&self, key: &str) -> Option<String> {
        self.objects
            .read()
            .await
            .get(key)
            .map(|o| o.content_type.clone())
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put(
        &self,
        key: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StorageError> {
        self.objects.write().await.insert(
            key.to_string(),
            StoredObject {
                content_type: content_type.to_string(),
                bytes,
            },
        );
        Ok(public_url(&self.public_base, key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_returns_public_url_and_keeps_bytes() {
        let store = MemoryObjectStore::new("https://media.example/");
        let url = store
            .put("1700000000000.png", "image/png", vec![1, 2, 3])
            .await
            .unwrap();

        assert_eq!(url, "https://media.example/1700000000000.png");
        assert_eq!(store.len().await, 1);
        assert_eq!(
            store.content_type_of("1700000000000.png").await.as_deref(),
            Some("image/png")
        );
        assert_eq!(
            store.objects.read().await.get("1700000000000.png").unwrap().bytes,
            vec![1, 2, 3]
        );
    }
}
