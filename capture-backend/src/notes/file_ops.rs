//! Filename helpers for note files
//!
//! Handles sanitization, truncation and timestamped default names.

use chrono::{DateTime, Local};

/// Characters no vault filesystem accepts in a filename
const RESERVED_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

pub const NOTE_EXTENSION: &str = "md";

/// Replace every reserved or control character with `_`
/// (e.g. "What? A/B: test" -> "What_ A_B_ test").
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_control() || RESERVED_CHARS.contains(&c) {
                '_'
            } else {
                c
            }
        })
        .collect()
}

/// Keep at most `max_chars` characters (not bytes)
pub fn truncate_chars(name: &str, max_chars: usize) -> String {
    name.chars().take(max_chars).collect()
}

/// Append the markdown extension
pub fn note_filename(stem: &str) -> String {
    format!("{}.{}", stem, NOTE_EXTENSION)
}

/// `<prefix> YYYY-MM-DD HH-mm-ss`, safe for use as a filename
pub fn timestamped_name(prefix: &str, now: &DateTime<Local>) -> String {
    format!("{} {}", prefix, now.format("%Y-%m-%d %H-%M-%S"))
}

/// Treat blank titles the same as missing ones
pub fn non_blank(title: Option<&str>) -> Option<&str> {
    title.filter(|t| !t.trim().is_empty())
}
