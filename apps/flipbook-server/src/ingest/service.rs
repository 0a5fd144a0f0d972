//! PDF ingestion pipeline
//!
//! rasterize -> upload every page -> register the flipbook.
//!
//! All uploads finish before the flipbook is registered, so a failure never
//! leaves a half-built entry in the store. Pages uploaded before the failure
//! stay in the bucket as orphans.

use std::sync::Arc;

use chrono::Utc;

use crate::error::{AppError, Result};
use crate::flipbook::{generate_id, Flipbook, FlipbookStore, NewFlipbook};
use crate::pdf::PageRasterizer;
use crate::storage::BlobStore;

/// Content type of every stored page image
pub const PAGE_CONTENT_TYPE: &str = "image/png";

/// Extension an upload must carry
const PDF_EXTENSION: &str = ".pdf";

/// Orchestrates turning an uploaded PDF into a registered flipbook
#[derive(Clone)]
pub struct IngestionService {
    rasterizer: Arc<dyn PageRasterizer>,
    blobs: Arc<dyn BlobStore>,
    store: FlipbookStore,
    key_prefix: String,
}

impl IngestionService {
    pub fn new(
        rasterizer: Arc<dyn PageRasterizer>,
        blobs: Arc<dyn BlobStore>,
        store: FlipbookStore,
        key_prefix: impl Into<String>,
    ) -> Self {
        Self {
            rasterizer,
            blobs,
            store,
            key_prefix: key_prefix.into(),
        }
    }

    /// Object key for a page; `page_number` starts at 1
    pub fn page_key(&self, flipbook_id: &str, page_number: usize) -> String {
        let prefix = self.key_prefix.trim_matches('/');
        if prefix.is_empty() {
            format!("{}/page_{}.png", flipbook_id, page_number)
        } else {
            format!("{}/{}/page_{}.png", prefix, flipbook_id, page_number)
        }
    }

    /// Ingest an uploaded PDF and register it as a flipbook
    pub async fn ingest(&self, filename: &str, pdf: Vec<u8>) -> Result<Flipbook> {
        if !filename.ends_with(PDF_EXTENSION) {
            return Err(AppError::InvalidRequest(
                "Only PDF files are allowed".to_string(),
            ));
        }

        let now = Utc::now();
        let id = generate_id(filename, now)?;

        tracing::info!(
            flipbook_id = %id,
            file_name = %filename,
            size = pdf.len(),
            "Rasterizing PDF"
        );

        let pages = self.rasterizer.rasterize(pdf).await?;
        if pages.is_empty() {
            return Err(AppError::InvalidRequest(
                "PDF contains no pages".to_string(),
            ));
        }

        let mut image_urls = Vec::with_capacity(pages.len());
        for (index, page) in pages.into_iter().enumerate() {
            let key = self.page_key(&id, index + 1);
            tracing::debug!(
                key = %key,
                width = page.width,
                height = page.height,
                "Storing page image"
            );
            self.blobs
                .put_object(&key, page.png, PAGE_CONTENT_TYPE)
                .await?;
            image_urls.push(self.blobs.public_url(&key));
        }

        tracing::info!(
            flipbook_id = %id,
            pages = image_urls.len(),
            "Uploaded page images"
        );

        self.store
            .register(NewFlipbook {
                id,
                created_at: now,
                original_filename: filename.to_string(),
                image_urls,
            })
            .await
    }
}
