//! Flipbook endpoints
//!
//! - GET  /flipbook/:id                  - viewer HTML
//! - GET  /flipbook/:id/view             - same viewer, kept for old links
//! - POST /flipbook/:id/add_video_embed  - place a video on a page
//! - GET  /api/v1/flipbooks/:id          - flipbook record as JSON

use axum::{
    extract::{Path, State},
    response::Html,
    Form, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::flipbook::{max_page, place_pages, VideoInsertion};
use crate::html::render_flipbook;
use crate::state::AppState;

/// Form body for adding a video
#[derive(Debug, Deserialize)]
pub struct AddVideoForm {
    pub video_url: String,
    pub page: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddVideoResponse {
    pub message: String,
    pub video_id: String,
    pub flipbook_id: String,
}

/// Flipbook record plus its derived layout numbers
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlipbookDetails {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub original_filename: String,
    pub image_urls: Vec<String>,
    pub video_embeds: Vec<VideoInsertion>,
    /// Highest page a new video may target
    pub max_page: usize,
    /// Pages in the rendered viewer, padding included
    pub page_count: usize,
}

pub async fn view_flipbook(
    State(state): State<AppState>,
    Path(flipbook_id): Path<String>,
) -> Result<Html<String>> {
    let flipbook = state.store().get(&flipbook_id).await?;
    let pages = place_pages(&flipbook.image_urls, &flipbook.video_embeds);

    tracing::debug!(
        flipbook_id = %flipbook_id,
        pages = pages.len(),
        "Rendering flipbook"
    );

    Ok(Html(render_flipbook(&flipbook.id, &pages)))
}

pub async fn add_video_embed(
    State(state): State<AppState>,
    Path(flipbook_id): Path<String>,
    Form(form): Form<AddVideoForm>,
) -> Result<Json<AddVideoResponse>> {
    let insertion = state
        .store()
        .add_video(&flipbook_id, &form.video_url, form.page)
        .await?;

    Ok(Json(AddVideoResponse {
        message: format!("Video added to page {}", insertion.page),
        video_id: insertion.video_id,
        flipbook_id,
    }))
}

pub async fn get_flipbook_details(
    State(state): State<AppState>,
    Path(flipbook_id): Path<String>,
) -> Result<Json<FlipbookDetails>> {
    let flipbook = state.store().get(&flipbook_id).await?;
    let page_count = place_pages(&flipbook.image_urls, &flipbook.video_embeds).len();

    Ok(Json(FlipbookDetails {
        max_page: max_page(flipbook.image_urls.len(), flipbook.video_embeds.len()),
        page_count,
        id: flipbook.id,
        created_at: flipbook.created_at,
        original_filename: flipbook.original_filename,
        image_urls: flipbook.image_urls,
        video_embeds: flipbook.video_embeds,
    }))
}
