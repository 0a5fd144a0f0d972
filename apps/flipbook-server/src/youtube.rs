//! YouTube video reference parsing
//!
//! Accepts watch URLs, short links, embed URLs or a bare video ID and pulls
//! out the 11-character ID. The fallback to "last 11 characters" is kept even
//! for malformed input because stored insertions already rely on it.

use std::sync::LazyLock;

use regex::Regex;

/// Length of a YouTube video ID
pub const VIDEO_ID_LEN: usize = 11;

static VIDEO_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:v=|/)([0-9A-Za-z_-]{11})").expect("video id pattern is valid")
});

/// Extract a video ID from a URL or raw ID.
///
/// Returns `None` when the input is too short to contain an ID.
pub fn extract_video_id(input: &str) -> Option<String> {
    if let Some(caps) = VIDEO_ID_PATTERN.captures(input) {
        return caps.get(1).map(|m| m.as_str().to_string());
    }

    let len = input.chars().count();
    if len >= VIDEO_ID_LEN {
        Some(input.chars().skip(len - VIDEO_ID_LEN).collect())
    } else {
        None
    }
}

/// Canonical embed URL for a video ID
pub fn embed_url(video_id: &str) -> String {
    format!("https://www.youtube.com/embed/{}", video_id)
}
