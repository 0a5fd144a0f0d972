//! Rasterizer abstraction
//!
//! Turns PDF bytes into one PNG per page, in document order.

use std::io::Cursor;

use async_trait::async_trait;
use image::DynamicImage;
use thiserror::Error;

/// Rasterization errors
#[derive(Error, Debug)]
pub enum RasterError {
    #[error("Failed to initialize pdfium: {0}")]
    PdfiumInit(String),
    #[error("Failed to load PDF: {0}")]
    LoadError(String),
    #[error("Failed to render page {page}: {reason}")]
    RenderError { page: usize, reason: String },
    #[error("Image encoding error: {0}")]
    ImageError(String),
    #[error("Rasterization task failed: {0}")]
    TaskFailed(String),
}

/// A single rendered page
#[derive(Debug, Clone)]
pub struct RasterPage {
    /// PNG-encoded image
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Produces page images from a PDF document
#[async_trait]
pub trait PageRasterizer: Send + Sync {
    async fn rasterize(&self, pdf: Vec<u8>) -> Result<Vec<RasterPage>, RasterError>;
}

/// Encode an image buffer as PNG
pub fn encode_png(image: &DynamicImage) -> Result<RasterPage, RasterError> {
    let mut png = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .map_err(|e| RasterError::ImageError(e.to_string()))?;

    Ok(RasterPage {
        png,
        width: image.width(),
        height: image.height(),
    })
}

/// Wrap raw RGBA samples and encode them as PNG
pub fn encode_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<RasterPage, RasterError> {
    let buffer = image::RgbaImage::from_raw(width, height, rgba)
        .ok_or_else(|| RasterError::ImageError("Failed to create image buffer".to_string()))?;
    encode_png(&DynamicImage::ImageRgba8(buffer))
}
