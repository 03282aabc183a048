//! Display strings and tag fields built from an `ExtractionResult`.
//!
//! The stored title never carries the remix credit; the display title
//! puts it back as "(E & F Remix)" so multiple remixers read differently
//! from the comma-joined artist list.

use any_ascii::any_ascii;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::extract::MULTI_SPACE;
use crate::models::{ArtistRole, ExtractionResult};

/// Characters no common file system accepts in a file name.
pub static ILLEGAL_FILENAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[<>:"/\\|?*\x00-\x1F\x7F]"#).unwrap());

/// Comma-and-space joined names of every credited artist, in order.
pub fn display_artists(result: &ExtractionResult) -> String {
    result
        .artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Comma-and-space joined names of one role, or `None` if nobody has it.
pub fn display_role(result: &ExtractionResult, role: ArtistRole) -> Option<String> {
    let names: Vec<&str> = result
        .artists_by_role(role)
        .map(|a| a.name.as_str())
        .collect();
    if names.is_empty() {
        None
    } else {
        Some(names.join(", "))
    }
}

/// Title with the remix credit appended when a remix was credited.
/// The credit's own names are used, so a self-remix still shows.
pub fn display_title(result: &ExtractionResult) -> String {
    match &result.remix {
        Some(credit) if !credit.names.is_empty() => {
            let credit = format!("{} {}", credit.names.join(" & "), credit.remix_type);
            if result.title.is_empty() {
                credit
            } else {
                format!("{} ({})", result.title, credit)
            }
        }
        _ => result.title.clone(),
    }
}

/// Fields handed to the audio-tag writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagFields {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub comment: Option<String>,
}

impl TagFields {
    /// Album mirrors the display title, as uploads are single tracks.
    pub fn from_result(result: &ExtractionResult, comment: Option<String>) -> Self {
        let title = display_title(result);
        Self {
            album: title.clone(),
            title,
            artist: display_artists(result),
            comment,
        }
    }
}

/// Strip characters illegal in file names and tidy the leftover spacing.
pub fn sanitize_file_name(name: &str) -> String {
    let stripped = ILLEGAL_FILENAME_CHARS.replace_all(name, "");
    MULTI_SPACE
        .replace_all(stripped.trim(), " ")
        .trim_end_matches('.')
        .to_string()
}

/// "<display artists> - <display title>.<ext>", safe to write to disk.
pub fn file_name(result: &ExtractionResult, ext: &str, ascii: bool) -> String {
    let title = display_title(result);
    let stem = if title.is_empty() {
        display_artists(result)
    } else {
        format!("{} - {}", display_artists(result), title)
    };
    let stem = if ascii { any_ascii(&stem) } else { stem };
    let ext = ext.trim_start_matches('.');
    format!("{}.{}", sanitize_file_name(&stem), sanitize_file_name(ext))
}
