//! The extraction pipeline: one pure function from (title, username) to
//! an `ExtractionResult`.
//!
//! Stage order: sanitize, leading split, producer, feature, remix, then
//! normalize and dedup. Each stage takes the working title by reference
//! and hands back a new string.

use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashSet;
use tracing::debug;
use unicode_normalization::UnicodeNormalization;

use crate::credits::{extract_features, extract_leading_features, extract_producers, extract_remixers};
use crate::models::{Artist, ArtistRole, ExtractionResult, RemixCredit};
use crate::sanitize::sanitize_title;
use crate::segment::{split_artists, split_leading_artist};

/// Used when neither the title nor the uploader yields a name.
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Regex to collapse whitespace runs left behind by stripped fragments
pub static MULTI_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").unwrap());

// ============================================================================
// PIPELINE
// ============================================================================

/// Extract the canonical title and role-annotated artists from an upload.
///
/// Never fails. With nothing recognizable the result is the sanitized
/// title and the uploader as the single Main artist. A title made only of
/// credits comes back empty rather than with the credits put back.
pub fn extract(title: &str, username: &str) -> ExtractionResult {
    let sanitized = sanitize_title(title);
    let mut artists: Vec<Artist> = Vec::new();

    let (working, leading) = split_leading_artist(&sanitized);
    if let Some(segment) = leading {
        let (main_part, featured) = extract_leading_features(&segment);
        debug!(segment = %segment, "leading artist block");
        artists.extend(
            split_artists(&main_part)
                .into_iter()
                .map(|name| Artist::new(name, ArtistRole::Main)),
        );
        artists.extend(
            featured
                .into_iter()
                .map(|name| Artist::new(name, ArtistRole::Featuring)),
        );
    }

    let (working, producers) = extract_producers(&working);
    artists.extend(
        producers
            .into_iter()
            .map(|name| Artist::new(name, ArtistRole::Producer)),
    );

    let (working, features) = extract_features(&working);
    artists.extend(
        features
            .into_iter()
            .map(|name| Artist::new(name, ArtistRole::Featuring)),
    );

    let (working, remix) = extract_remixers(&working);
    let remix = remix.map(|credit| RemixCredit {
        names: dedup_names(credit.names),
        remix_type: credit.remix_type,
    });
    if let Some(credit) = &remix {
        artists.extend(
            credit
                .names
                .iter()
                .map(|name| Artist::remixer(name.as_str(), credit.remix_type)),
        );
    }

    // May be empty when every word was a credit; stripped credits never come back
    let title = normalize_text(&working);

    let mut artists = dedup_artists(artists);
    let uploader_fallback = artists.is_empty();
    if uploader_fallback {
        debug!(username, "no artist in title, using uploader");
        artists.push(fallback_artist(username));
    }

    ExtractionResult {
        title,
        artists,
        remix,
        uploader_fallback,
    }
}

// ============================================================================
// NORMALIZATION
// ============================================================================

/// Trim, collapse inner whitespace runs and compose to NFC.
pub fn normalize_text(s: &str) -> String {
    let composed: String = s.trim().nfc().collect();
    MULTI_SPACE.replace_all(&composed, " ").to_string()
}

/// Normalize names, drop empties and collapse repeats by exact name.
/// The first occurrence keeps its role, remix type and position.
pub fn dedup_artists(artists: Vec<Artist>) -> Vec<Artist> {
    let mut seen: FxHashSet<String> = FxHashSet::default();
    artists
        .into_iter()
        .filter_map(|mut artist| {
            artist.name = normalize_text(&artist.name);
            if artist.name.is_empty() || !seen.insert(artist.name.clone()) {
                return None;
            }
            Some(artist)
        })
        .collect()
}

/// Normalize and dedup a plain name list, first occurrence wins.
fn dedup_names(names: Vec<String>) -> Vec<String> {
    let mut seen: FxHashSet<String> = FxHashSet::default();
    names
        .into_iter()
        .map(|name| normalize_text(&name))
        .filter(|name| !name.is_empty() && seen.insert(name.clone()))
        .collect()
}

/// The single Main artist used when the title names nobody.
pub fn fallback_artist(username: &str) -> Artist {
    let name = normalize_text(username);
    if name.is_empty() {
        Artist::new(UNKNOWN_ARTIST, ArtistRole::Main)
    } else {
        Artist::new(name, ArtistRole::Main)
    }
}

// ============================================================================
// TESTS
// ============================================================================
