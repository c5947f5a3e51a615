//! Shared helpers for markdown import.

use pulldown_cmark::HeadingLevel;

/// Convert heading level enum to number (1-6).
#[must_use]
pub(crate) fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Split a fence info string into language and meta.
///
/// The language is the first whitespace-separated word; the meta is the
/// remainder, trimmed. Either is `None` when empty.
#[must_use]
pub(crate) fn split_fence_info(info: &str) -> (Option<&str>, Option<&str>) {
    let info = info.trim();
    let (language, meta) = match info.find(char::is_whitespace) {
        Some(pos) => (&info[..pos], info[pos..].trim()),
        None => (info, ""),
    };
    (
        Some(language).filter(|s| !s.is_empty()),
        Some(meta).filter(|s| !s.is_empty()),
    )
}
