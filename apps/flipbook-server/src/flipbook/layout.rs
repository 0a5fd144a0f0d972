//! Page placement
//!
//! Merges the page images of a flipbook with its video insertions into one
//! linear page sequence.
//!
//! The cover always stays on page 1. Remaining images are walked in order
//! with a running page counter; a video whose target matches the counter is
//! slotted in first and pushes the image (and everything after it) one page
//! later. Videos targeting pages past the last image keep their literal page
//! number, even if that leaves a hole in the numbering. The result is padded
//! with a blank page when the count is odd so that every leaf has a back.

use std::collections::HashMap;

use super::types::{PageSlot, VideoInsertion};

/// Highest page a new video may target.
///
/// Every video already placed occupies a page of its own, so the addressable
/// range grows by one per existing insertion.
pub fn max_page(image_count: usize, insertion_count: usize) -> usize {
    image_count + insertion_count + 1
}

/// Compute the ordered page sequence for a flipbook.
///
/// No range validation happens here; callers enforce [`max_page`] when
/// accepting insertions.
pub fn place_pages(images: &[String], insertions: &[VideoInsertion]) -> Vec<PageSlot> {
    let mut pages = Vec::with_capacity(images.len() + insertions.len() + 1);

    let Some((cover, rest)) = images.split_first() else {
        return pad_to_even(place_trailing(pages, insertions, 2));
    };
    pages.push(PageSlot::image(1, cover.as_str()));

    // Later insertions for the same page replace earlier ones
    let by_page: HashMap<usize, &str> = insertions
        .iter()
        .map(|v| (v.page, v.video_id.as_str()))
        .collect();

    let mut counter = 2;
    for url in rest {
        if let Some(video_id) = by_page.get(&counter) {
            pages.push(PageSlot::video(counter, *video_id));
            counter += 1;
        }
        pages.push(PageSlot::image(counter, url.as_str()));
        counter += 1;
    }

    pad_to_even(place_trailing(pages, insertions, counter))
}

/// Append videos that address pages at or past `counter`, then sort.
fn place_trailing(
    mut pages: Vec<PageSlot>,
    insertions: &[VideoInsertion],
    counter: usize,
) -> Vec<PageSlot> {
    pages.extend(
        insertions
            .iter()
            .filter(|v| v.page >= counter)
            .map(|v| PageSlot::video(v.page, v.video_id.as_str())),
    );
    // Stable: ties keep emission order
    pages.sort_by_key(|slot| slot.number);
    pages
}

fn pad_to_even(mut pages: Vec<PageSlot>) -> Vec<PageSlot> {
    if pages.len() % 2 != 0 {
        pages.push(PageSlot::blank(pages.len() + 1));
    }
    pages
}
