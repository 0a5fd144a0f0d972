//! Flipbook Server Library
//!
//! Turns uploaded PDFs into page images stored in S3-compatible storage and
//! serves them as a page-flip viewer with optional YouTube embeds.
//! The server binary is in main.rs.
//!
//! # Modules
//!
//! - `flipbook`: domain types, page placement and the in-memory registry
//! - `html`: viewer document rendering
//! - `ingest`: PDF -> page images -> flipbook pipeline
//! - `pdf`: page rasterization via pdfium
//! - `storage`: S3 and in-memory blob stores
//! - `routes`: HTTP surface

pub mod config;
pub mod error;
pub mod flipbook;
pub mod html;
pub mod ingest;
pub mod pdf;
pub mod routes;
pub mod state;
pub mod storage;
pub mod youtube;
