//! Flipbook model
//!
//! Domain types, the page placement engine and the in-memory registry.

mod layout;
mod store;
mod types;

pub use layout::{max_page, place_pages};
pub use store::{generate_id, FlipbookStore};
pub use types::{Flipbook, NewFlipbook, PageContent, PageSlot, VideoInsertion};
