//! PDF rasterization module
//!
//! Converts uploaded PDFs into PNG page images using pdfium-render.

mod pdfium;
mod rasterizer;

pub use pdfium::PdfiumRasterizer;
pub use rasterizer::{encode_png, encode_rgba, PageRasterizer, RasterError, RasterPage};
