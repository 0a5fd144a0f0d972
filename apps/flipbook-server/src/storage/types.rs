//! Storage types

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::StorageError;

/// Metadata about a storage object
#[derive(Debug, Clone, Serialize)]
pub struct ObjectMetadata {
    pub key: String,
    pub size: i64,
    pub last_modified: Option<DateTime<Utc>>,
    pub content_type: Option<String>,
}

/// A storage object with its data
#[derive(Debug, Clone)]
pub struct StorageObject {
    pub metadata: ObjectMetadata,
    pub data: Vec<u8>,
}

/// Blob store the ingestion pipeline writes page images into
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Write an object, replacing any existing one under the same key
    async fn put_object(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError>;

    /// Read an object back
    async fn get_object(&self, key: &str) -> Result<StorageObject, StorageError>;

    /// Public URL browsers use to fetch `key`
    fn public_url(&self, key: &str) -> String;
}

/// Join a base URL and an object key with exactly one slash
pub fn join_url(base: &str, key: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        key.trim_start_matches('/')
    )
}
