//! PDF ingestion
//!
//! Turns an uploaded PDF into stored page images and a registered flipbook.

mod service;

pub use service::{IngestionService, PAGE_CONTENT_TYPE};
