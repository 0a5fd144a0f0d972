//! Page rasterization using pdfium-render
//!
//! pdfium is bound at runtime, so the shared library only has to be present
//! on machines that actually ingest documents. Rendering is CPU-bound and
//! runs on the blocking thread pool.

use std::path::PathBuf;

use async_trait::async_trait;
use pdfium_render::prelude::*;

use crate::config::RenderConfig;

use super::rasterizer::{encode_rgba, PageRasterizer, RasterError, RasterPage};

/// PDF points per inch
const POINTS_PER_INCH: f32 = 72.0;

/// Rasterizer backed by the pdfium shared library
#[derive(Debug, Clone)]
pub struct PdfiumRasterizer {
    library_path: Option<PathBuf>,
    scale: f32,
}

impl PdfiumRasterizer {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            library_path: config.pdfium_library_path.clone(),
            scale: config.dpi / POINTS_PER_INCH,
        }
    }

    /// Bind pdfium, preferring the configured path
    fn bind(library_path: Option<&PathBuf>) -> Result<Pdfium, RasterError> {
        let bindings = match library_path {
            Some(path) => Pdfium::bind_to_library(path).or_else(|e| {
                tracing::warn!(path = %path.display(), "Could not bind configured pdfium: {}", e);
                Self::bind_default()
            }),
            None => Self::bind_default(),
        }
        .map_err(|e| RasterError::PdfiumInit(e.to_string()))?;

        Ok(Pdfium::new(bindings))
    }

    /// Try common install locations, then the system loader
    fn bind_default() -> Result<Box<dyn PdfiumLibraryBindings>, PdfiumError> {
        Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("/usr/lib")))
            .or_else(|_| Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("/usr/local/lib")))
            .or_else(|_| Pdfium::bind_to_system_library())
    }

    fn render_all(
        library_path: Option<&PathBuf>,
        scale: f32,
        pdf: Vec<u8>,
    ) -> Result<Vec<RasterPage>, RasterError> {
        let pdfium = Self::bind(library_path)?;
        let document = pdfium
            .load_pdf_from_byte_vec(pdf, None)
            .map_err(|e| RasterError::LoadError(e.to_string()))?;

        let config = PdfRenderConfig::new().scale_page_by_factor(scale);

        let mut pages = Vec::new();
        for (index, page) in document.pages().iter().enumerate() {
            let number = index + 1;
            let bitmap = page
                .render_with_config(&config)
                .map_err(|e| RasterError::RenderError {
                    page: number,
                    reason: e.to_string(),
                })?;

            let width = bitmap.width() as u32;
            let height = bitmap.height() as u32;
            pages.push(encode_rgba(width, height, bitmap.as_rgba_bytes())?);

            tracing::debug!(page = number, width, height, "Rendered page");
        }

        Ok(pages)
    }
}

#[async_trait]
impl PageRasterizer for PdfiumRasterizer {
    async fn rasterize(&self, pdf: Vec<u8>) -> Result<Vec<RasterPage>, RasterError> {
        let library_path = self.library_path.clone();
        let scale = self.scale;

        tokio::task::spawn_blocking(move || Self::render_all(library_path.as_ref(), scale, pdf))
            .await
            .map_err(|e| RasterError::TaskFailed(format!("Task join error: {}", e)))?
    }
}
