//! Promotional-noise removal for raw upload titles.
//!
//! Uploaders append "Free Download" / "Video in Description" style
//! annotations. Everything from the first such phrase to the end of the
//! title is dropped; text before it is kept verbatim.

use once_cell::sync::Lazy;
use regex::Regex;

/// Promotional phrase plus any wrapping bracket and trailing text.
/// Leading separators (" - ", " | ", "*") that introduce the phrase go with it.
pub static PROMOTION_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?is)\s*(?:[-–—|~*]\s*)*[\(\[{]?\s*\b(?:free\s+download|free\s+dl|video\s+in\s+description|video\s+in\s+desc|vid\s+in\s+desc)\b.*$",
    )
    .unwrap()
});

/// Strip the promotional suffix, if any. Never touches artist text.
pub fn sanitize_title(title: &str) -> String {
    match PROMOTION_SUFFIX.find(title) {
        Some(m) => title[..m.start()].to_string(),
        None => title.to_string(),
    }
}
