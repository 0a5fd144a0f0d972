//! Route modules for the Flipbook server

pub mod flipbook;
pub mod health;
pub mod upload;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let max_upload = state.config().server.max_upload_bytes;
    let static_dir = state.config().server.static_dir.clone();

    Router::new()
        .route("/health", get(health::health_check))
        .route(
            "/upload",
            post(upload::upload_pdf).layer(DefaultBodyLimit::max(max_upload)),
        )
        .route("/flipbook/:flipbook_id", get(flipbook::view_flipbook))
        .route("/flipbook/:flipbook_id/view", get(flipbook::view_flipbook))
        .route(
            "/flipbook/:flipbook_id/add_video_embed",
            post(flipbook::add_video_embed),
        )
        .route(
            "/api/v1/flipbooks/:flipbook_id",
            get(flipbook::get_flipbook_details),
        )
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
