//! In-memory blob store
//!
//! Used by tests and for running the server without an object store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::StorageError;

use super::types::{join_url, BlobStore, ObjectMetadata, StorageObject};

#[derive(Clone)]
pub struct MemoryBlobStore {
    base_url: String,
    objects: Arc<RwLock<HashMap<String, StorageObject>>>,
}

impl MemoryBlobStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            objects: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// All stored keys, sorted
    pub async fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put_object(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        let object = StorageObject {
            metadata: ObjectMetadata {
                key: key.to_string(),
                size: data.len() as i64,
                last_modified: Some(Utc::now()),
                content_type: Some(content_type.to_string()),
            },
            data,
        };
        self.objects.write().await.insert(key.to_string(), object);
        Ok(())
    }

    async fn get_object(&self, key: &str) -> Result<StorageObject, StorageError> {
        self.objects
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::ObjectNotFound(key.to_string()))
    }

    fn public_url(&self, key: &str) -> String {
        join_url(&self.base_url, key)
    }
}
