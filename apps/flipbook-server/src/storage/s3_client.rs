//! S3-compatible storage client
//!
//! Wraps the AWS SDK for S3-compatible storage access.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::{
    config::{Credentials, Region},
    primitives::ByteStream,
    types::{BucketLocationConstraint, CreateBucketConfiguration},
    Client,
};
use chrono::DateTime;

use crate::config::{StorageConfig, StorageProvider};
use crate::error::StorageError;

use super::types::{join_url, BlobStore, ObjectMetadata, StorageObject};

/// Region S3 treats as the default; buckets there take no location constraint
const DEFAULT_REGION: &str = "us-east-1";

/// S3-compatible storage client
#[derive(Clone)]
pub struct S3Client {
    client: Client,
    bucket: String,
    region: String,
    provider: StorageProvider,
    public_base_url: String,
}

impl S3Client {
    /// Create a new S3 client from configuration
    pub fn new(config: &StorageConfig) -> Self {
        let credentials = Credentials::new(
            &config.access_key,
            &config.secret_key,
            None,
            None,
            "flipbook",
        );

        let region = config
            .region
            .clone()
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        let s3_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .endpoint_url(&config.endpoint)
            .region(Region::new(region.clone()))
            .credentials_provider(credentials)
            .force_path_style(config.provider.force_path_style())
            .build();

        Self {
            client: Client::from_conf(s3_config),
            bucket: config.bucket.clone(),
            region,
            provider: config.provider,
            public_base_url: config.public_base_url(),
        }
    }

    /// Get the bucket name
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Make sure the bucket exists.
    ///
    /// Any failure to confirm the bucket (missing, forbidden, unreachable) is
    /// treated as "must create". Creating an existing bucket we own is harmless.
    pub async fn ensure_bucket(&self) -> Result<(), StorageError> {
        match self.client.head_bucket().bucket(&self.bucket).send().await {
            Ok(_) => {
                tracing::info!("Connected to S3 bucket: {}", self.bucket);
                return Ok(());
            }
            Err(e) => {
                tracing::warn!(
                    "Could not verify bucket {}: {}. Creating it.",
                    self.bucket,
                    e
                );
            }
        }

        let mut request = self.client.create_bucket().bucket(&self.bucket);
        if self.provider == StorageProvider::S3 && self.region != DEFAULT_REGION {
            request = request.create_bucket_configuration(
                CreateBucketConfiguration::builder()
                    .location_constraint(BucketLocationConstraint::from(self.region.as_str()))
                    .build(),
            );
        }

        request
            .send()
            .await
            .map_err(|e| StorageError::BucketCreateFailed {
                bucket: self.bucket.clone(),
                reason: e.to_string(),
            })?;

        tracing::info!("Created S3 bucket: {}", self.bucket);
        Ok(())
    }
}

#[async_trait]
impl BlobStore for S3Client {
    async fn put_object(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        let size = data.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| StorageError::UploadFailed {
                key: key.to_string(),
                reason: e.to_string(),
            })?;

        tracing::debug!(key = %key, size, "Uploaded object");
        Ok(())
    }

    async fn get_object(&self, key: &str) -> Result<StorageObject, StorageError> {
        let response = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                if e.to_string().contains("404") || e.to_string().contains("NoSuchKey") {
                    StorageError::ObjectNotFound(key.to_string())
                } else {
                    StorageError::SdkError(format!("Failed to get object {}: {}", key, e))
                }
            })?;

        let metadata = ObjectMetadata {
            key: key.to_string(),
            size: response.content_length().unwrap_or(0),
            last_modified: response
                .last_modified()
                .and_then(|dt| DateTime::from_timestamp(dt.secs(), dt.subsec_nanos())),
            content_type: response.content_type().map(|s| s.to_string()),
        };

        let data = response
            .body
            .collect()
            .await
            .map_err(|e| StorageError::SdkError(format!("Failed to read object body: {}", e)))?
            .into_bytes()
            .to_vec();

        Ok(StorageObject { metadata, data })
    }

    fn public_url(&self, key: &str) -> String {
        join_url(&self.public_base_url, key)
    }
}
