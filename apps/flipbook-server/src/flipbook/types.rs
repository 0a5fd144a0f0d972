//! Flipbook domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered flipbook
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flipbook {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub original_filename: String,
    /// Page images in document order; index 0 is the cover
    pub image_urls: Vec<String>,
    /// Video insertions in arrival order (not page order)
    pub video_embeds: Vec<VideoInsertion>,
}

/// A request to place a video at a page number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoInsertion {
    pub page: usize,
    pub video_id: String,
}

/// Everything needed to register a flipbook whose id was generated up front
#[derive(Debug, Clone)]
pub struct NewFlipbook {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub original_filename: String,
    pub image_urls: Vec<String>,
}

/// What a rendered page shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageContent {
    Image(String),
    Video(String),
    /// Trailing filler that keeps the page count even
    Blank,
}

/// One page of the final layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSlot {
    pub number: usize,
    pub content: PageContent,
}

impl PageSlot {
    pub fn image(number: usize, url: impl Into<String>) -> Self {
        Self {
            number,
            content: PageContent::Image(url.into()),
        }
    }

    pub fn video(number: usize, video_id: impl Into<String>) -> Self {
        Self {
            number,
            content: PageContent::Video(video_id.into()),
        }
    }

    pub fn blank(number: usize) -> Self {
        Self {
            number,
            content: PageContent::Blank,
        }
    }
}
