//! In-memory flipbook registry
//!
//! Flipbooks live for the lifetime of the process. The store is a cheap
//! clonable handle; all clones share the same map.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::youtube::extract_video_id;

use super::layout::max_page;
use super::types::{Flipbook, NewFlipbook, VideoInsertion};

/// Length of the random suffix appended to generated ids
const ID_SUFFIX_LEN: usize = 8;

/// Shared flipbook registry
#[derive(Clone, Default)]
pub struct FlipbookStore {
    flipbooks: Arc<RwLock<HashMap<String, Flipbook>>>,
}

impl FlipbookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate an id and register a flipbook for already-uploaded images.
    pub async fn create(&self, original_filename: &str, image_urls: Vec<String>) -> Result<String> {
        let now = Utc::now();
        let id = generate_id(original_filename, now)?;
        let flipbook = self
            .register(NewFlipbook {
                id,
                created_at: now,
                original_filename: original_filename.to_string(),
                image_urls,
            })
            .await?;
        Ok(flipbook.id)
    }

    /// Register a flipbook under an id the caller generated earlier.
    pub async fn register(&self, new: NewFlipbook) -> Result<Flipbook> {
        let flipbook = Flipbook {
            id: new.id,
            created_at: new.created_at,
            original_filename: new.original_filename,
            image_urls: new.image_urls,
            video_embeds: Vec::new(),
        };

        let mut flipbooks = self.flipbooks.write().await;
        if flipbooks.contains_key(&flipbook.id) {
            return Err(AppError::Internal(format!(
                "Flipbook id collision: {}",
                flipbook.id
            )));
        }
        flipbooks.insert(flipbook.id.clone(), flipbook.clone());

        tracing::info!(
            flipbook_id = %flipbook.id,
            pages = flipbook.image_urls.len(),
            "Registered flipbook"
        );

        Ok(flipbook)
    }

    /// Get a snapshot of a flipbook
    pub async fn get(&self, id: &str) -> Result<Flipbook> {
        self.flipbooks
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| flipbook_not_found(id))
    }

    /// Append a video insertion.
    ///
    /// The bound check and the append run under the same write lock, so two
    /// concurrent requests cannot both pass a check against the same bound.
    pub async fn add_video(&self, id: &str, video_url: &str, page: i64) -> Result<VideoInsertion> {
        let mut flipbooks = self.flipbooks.write().await;
        let flipbook = flipbooks.get_mut(id).ok_or_else(|| flipbook_not_found(id))?;

        if page <= 1 {
            return Err(AppError::InvalidRequest(
                "Videos cannot be placed on the cover (page 1)".to_string(),
            ));
        }

        let max = max_page(flipbook.image_urls.len(), flipbook.video_embeds.len());
        let page = usize::try_from(page)
            .ok()
            .filter(|p| *p <= max)
            .ok_or_else(|| {
                AppError::InvalidRequest(format!("Invalid page. The maximum page is {}", max))
            })?;

        let video_id = extract_video_id(video_url)
            .ok_or_else(|| AppError::InvalidRequest("Invalid video URL".to_string()))?;

        let insertion = VideoInsertion { page, video_id };
        flipbook.video_embeds.push(insertion.clone());

        tracing::info!(
            flipbook_id = %id,
            page = insertion.page,
            video_id = %insertion.video_id,
            "Added video embed"
        );

        Ok(insertion)
    }

    pub async fn len(&self) -> usize {
        self.flipbooks.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.flipbooks.read().await.is_empty()
    }
}

fn flipbook_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Flipbook '{}' not found", id))
}

/// Build a flipbook id: `<stem>_<YYYYmmddHHMMSS>_<random>`.
///
/// The stem is the filename without directories or its last extension, with
/// every character outside `[A-Za-z0-9_-]` replaced by `_`. The same id is
/// used as the storage prefix for the page images.
pub fn generate_id(original_filename: &str, now: DateTime<Utc>) -> Result<String> {
    let stem = sanitize_stem(original_filename).ok_or_else(|| {
        AppError::InvalidRequest(format!(
            "Filename '{}' has no usable name",
            original_filename
        ))
    })?;

    let suffix: String = Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(ID_SUFFIX_LEN)
        .collect();

    Ok(format!("{}_{}_{}", stem, now.format("%Y%m%d%H%M%S"), suffix))
}

/// Returns `None` only when there is no stem at all. A leading dot starts a
/// hidden name, not an extension.
fn sanitize_stem(filename: &str) -> Option<String> {
    let name = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let stem = match name.rsplit_once('.') {
        Some((stem, _ext)) if !stem.trim_start_matches('.').is_empty() => stem,
        _ => name,
    };

    if stem.is_empty() {
        return None;
    }

    Some(
        stem.chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect(),
    )
}
