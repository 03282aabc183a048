//! Artist-block splitting.
//!
//! Two pieces live here: splitting "Artist - Title" at the first dash,
//! and segmenting a compound artist string ("A & B feat. C") into names.

use once_cell::sync::Lazy;
use regex::Regex;

// ============================================================================
// REGEX PATTERNS
// ============================================================================

/// "ArtistSegment - RestOfTitle". The lazy artist group makes the first
/// whitespace-surrounded dash win; "Jay-Z" style hyphens never split.
pub static LEADING_ARTIST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^\s*(\S.*?)\s+[-–—]\s+(.*\S)\s*$").unwrap()
});

/// Conjunction and featuring tokens between names.
/// Symbols may touch the names; word tokens need whitespace on both sides,
/// except that "feat." / "ft." may run straight into the next name.
pub static ARTIST_SEPARATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s*[,&]\s*|\s*\bw/\s*|\s+(?:feat|ft)\.\s*|\s+(?:featuring|feat|ft|with|x)\s+").unwrap()
});

// ============================================================================
// SPLITTING
// ============================================================================

/// Split off a leading artist block.
/// Returns `(title, Some(artist_segment))` on a split, `(title, None)` otherwise.
pub fn split_leading_artist(title: &str) -> (String, Option<String>) {
    if let Some(caps) = LEADING_ARTIST.captures(title) {
        let artist = caps.get(1).map_or("", |m| m.as_str()).trim();
        let rest = caps.get(2).map_or("", |m| m.as_str()).trim();
        if !artist.is_empty() && !rest.is_empty() {
            return (rest.to_string(), Some(artist.to_string()));
        }
    }
    (title.to_string(), None)
}

/// Segment a compound artist string into trimmed names, left to right.
///
/// Each round takes the first separator with non-empty text on both sides;
/// text before it is one name and the rest is scanned again. Duplicates are
/// kept (dedup is global, after all stages); empty names are dropped.
pub fn split_artists(src: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut remaining = src.trim();

    while !remaining.is_empty() {
        let split = ARTIST_SEPARATOR.find_iter(remaining).find(|m| {
            !remaining[..m.start()].trim().is_empty() && !remaining[m.end()..].trim().is_empty()
        });

        match split {
            Some(m) => {
                names.push(remaining[..m.start()].trim().to_string());
                remaining = remaining[m.end()..].trim();
            }
            None => {
                names.push(remaining.to_string());
                break;
            }
        }
    }

    names.retain(|n| !n.is_empty());
    names
}

// ============================================================================
// TESTS
// ============================================================================
