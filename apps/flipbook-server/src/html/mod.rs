//! HTML rendering
//!
//! Builds the flipbook viewer page served to browsers.

mod flipbook;

pub use flipbook::{parity_class, render_flipbook};
