//! HTTP-level tests against the real router with in-memory collaborators

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use flipbook_server::config::Config;
use flipbook_server::flipbook::FlipbookStore;
use flipbook_server::ingest::IngestionService;
use flipbook_server::pdf::{encode_rgba, PageRasterizer, RasterError, RasterPage};
use flipbook_server::routes;
use flipbook_server::state::AppState;
use flipbook_server::storage::MemoryBlobStore;

const BOUNDARY: &str = "flipbook-test-boundary";

/// Pretends every document has `pages` pages
struct StubRasterizer {
    pages: usize,
}

#[async_trait]
impl PageRasterizer for StubRasterizer {
    async fn rasterize(&self, _pdf: Vec<u8>) -> Result<Vec<RasterPage>, RasterError> {
        (0..self.pages)
            .map(|_| encode_rgba(2, 2, vec![200; 16]))
            .collect()
    }
}

/// Fails every document as unreadable
struct BrokenRasterizer;

#[async_trait]
impl PageRasterizer for BrokenRasterizer {
    async fn rasterize(&self, _pdf: Vec<u8>) -> Result<Vec<RasterPage>, RasterError> {
        Err(RasterError::LoadError("trailer not found".to_string()))
    }
}

struct TestApp {
    router: Router,
    store: FlipbookStore,
    blobs: MemoryBlobStore,
}

fn test_app(pages: usize) -> TestApp {
    test_app_with(Arc::new(StubRasterizer { pages }))
}

fn test_app_with(rasterizer: Arc<dyn PageRasterizer>) -> TestApp {
    let config = Config::default();
    let store = FlipbookStore::new();
    let blobs = MemoryBlobStore::new("http://localhost:9000/pdf-images");
    let ingestion = IngestionService::new(
        rasterizer,
        Arc::new(blobs.clone()),
        store.clone(),
        "pdf",
    );
    let router = routes::router(AppState::new(config, store.clone(), ingestion));
    TestApp {
        router,
        store,
        blobs,
    }
}

fn multipart_upload(filename: &str) -> Request<Body> {
    multipart_field("file", filename)
}

fn multipart_field(field: &str, filename: &str) -> Request<Body> {
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"{n}\"; filename=\"{f}\"\r\nContent-Type: application/pdf\r\n\r\n%PDF-1.4 test\r\n--{b}--\r\n",
        b = BOUNDARY,
        n = field,
        f = filename
    );
    Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

fn add_video_request(flipbook_id: &str, video_url: &str, page: &str) -> Request<Body> {
    let body = format!("video_url={}&page={}", form_encode(video_url), page);
    Request::builder()
        .method("POST")
        .uri(format!("/flipbook/{}/add_video_embed", flipbook_id))
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

fn form_encode(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '-' | '_' | '.' => c.to_string(),
            other => format!("%{:02X}", other as u32),
        })
        .collect()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: &TestApp, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn send_json(app: &TestApp, request: Request<Body>) -> (StatusCode, Value) {
    let (status, body) = send(app, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

async fn upload(app: &TestApp, filename: &str) -> String {
    let (status, json) = send_json(app, multipart_upload(filename)).await;
    assert_eq!(status, StatusCode::CREATED, "{}", json);
    json["flipbookId"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn upload_creates_flipbook_with_one_image_per_page() {
    let app = test_app(3);

    let (status, json) = send_json(&app, multipart_upload("brochure.pdf")).await;
    assert_eq!(status, StatusCode::CREATED);

    let id = json["flipbookId"].as_str().unwrap();
    assert!(id.starts_with("brochure_"));
    assert_eq!(json["flipbookUrl"], format!("/flipbook/{}", id));

    assert_eq!(app.store.get(id).await.unwrap().image_urls.len(), 3);
    assert_eq!(
        app.blobs.keys().await,
        (1..=3)
            .map(|n| format!("pdf/{}/page_{}.png", id, n))
            .collect::<Vec<_>>()
    );
}

#[tokio::test]
async fn upload_rejects_non_pdf() {
    let app = test_app(3);

    let (status, json) = send_json(&app, multipart_upload("notes.docx")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "invalid_request");
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn upload_accepts_non_ascii_filename() {
    let app = test_app(2);

    let id = upload(&app, "日本語.pdf").await;
    assert!(id.starts_with("____"));

    let flipbook = app.store.get(&id).await.unwrap();
    assert_eq!(flipbook.original_filename, "日本語.pdf");
    assert_eq!(flipbook.image_urls.len(), 2);
    assert_eq!(app.blobs.len().await, 2);
}

#[tokio::test]
async fn upload_without_file_field_is_rejected() {
    let app = test_app(3);

    let (status, json) = send_json(&app, multipart_field("document", "doc.pdf")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "invalid_request");
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn upload_surfaces_rasterize_failure() {
    let app = test_app_with(Arc::new(BrokenRasterizer));

    let (status, json) = send_json(&app, multipart_upload("doc.pdf")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "rasterize_error");
    assert!(json["message"]
        .as_str()
        .unwrap()
        .contains("trailer not found"));
    assert!(app.store.is_empty().await);
    assert!(app.blobs.is_empty().await);
}

#[tokio::test]
async fn render_unknown_flipbook_is_not_found() {
    let app = test_app(3);

    let (status, json) = send_json(&app, get("/flipbook/does-not-exist")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "not_found");

    let (status, _) = send(&app, get("/flipbook/does-not-exist/view")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn render_pads_odd_page_count() {
    let app = test_app(3);
    let id = upload(&app, "doc.pdf").await;

    let (status, body) = send(&app, get(&format!("/flipbook/{}", id))).await;
    assert_eq!(status, StatusCode::OK);

    let html = String::from_utf8(body).unwrap();
    assert!(html.contains(r#"id="page-4""#));
    assert!(!html.contains(r#"id="page-5""#));
    assert_eq!(html.matches("<img ").count(), 3);
}

#[tokio::test]
async fn render_is_byte_identical_without_mutation() {
    let app = test_app(5);
    let id = upload(&app, "doc.pdf").await;

    let (_, first) = send(&app, get(&format!("/flipbook/{}", id))).await;
    let (_, second) = send(&app, get(&format!("/flipbook/{}", id))).await;
    let (_, view) = send(&app, get(&format!("/flipbook/{}/view", id))).await;
    assert_eq!(first, second);
    assert_eq!(first, view);
}

#[tokio::test]
async fn add_video_shifts_pages() {
    let app = test_app(3);
    let id = upload(&app, "doc.pdf").await;

    let (status, json) = send_json(
        &app,
        add_video_request(&id, "https://youtu.be/dQw4w9WgXcQ", "2"),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", json);
    assert_eq!(json["videoId"], "dQw4w9WgXcQ");
    assert_eq!(json["flipbookId"], id.as_str());

    let (_, body) = send(&app, get(&format!("/flipbook/{}", id))).await;
    let html = String::from_utf8(body).unwrap();

    // cover=1, video=2, p2=3, p3=4; even count so no padding
    assert!(html.contains(r#"id="page-4""#));
    assert!(!html.contains(r#"id="page-5""#));
    let iframe = html.find("youtube.com/embed/dQw4w9WgXcQ").unwrap();
    assert!(html.find(r#"id="page-2""#).unwrap() < iframe);
    assert!(iframe < html.find(r#"id="page-3""#).unwrap());
    assert!(html.contains(&format!("pdf/{}/page_2.png", id)));
}

#[tokio::test]
async fn add_video_on_cover_is_rejected() {
    let app = test_app(3);
    let id = upload(&app, "doc.pdf").await;

    let (status, json) = send_json(&app, add_video_request(&id, "dQw4w9WgXcQ", "1")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "invalid_request");
}

#[tokio::test]
async fn add_video_bound_is_inclusive() {
    let app = test_app(3);
    let id = upload(&app, "doc.pdf").await;

    let (status, json) = send_json(&app, add_video_request(&id, "dQw4w9WgXcQ", "5")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["message"].as_str().unwrap().contains('4'));

    let (status, _) = send_json(&app, add_video_request(&id, "dQw4w9WgXcQ", "4")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = send_json(&app, get(&format!("/api/v1/flipbooks/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["maxPage"], 5);
    assert_eq!(json["pageCount"], 4);
    assert_eq!(json["videoEmbeds"][0]["page"], 4);
}

#[tokio::test]
async fn add_video_rejects_unparseable_reference() {
    let app = test_app(3);
    let id = upload(&app, "doc.pdf").await;

    let (status, _) = send_json(&app, add_video_request(&id, "short", "2")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(app.store.get(&id).await.unwrap().video_embeds.is_empty());
}

#[tokio::test]
async fn add_video_unknown_flipbook_is_not_found() {
    let app = test_app(3);

    let (status, json) = send_json(&app, add_video_request("missing", "dQw4w9WgXcQ", "2")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "not_found");
}

#[tokio::test]
async fn health_reports_service() {
    let app = test_app(1);

    let (status, json) = send_json(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "flipbook-server");
}
