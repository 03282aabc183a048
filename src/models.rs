//! Core data models for credit extraction.
//!
//! This module contains the role and remix-type enums, the extracted
//! `Artist` record and the `ExtractionResult` handed to tag composition.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Roles
// ============================================================================

/// Semantic category of an artist mention. Decides tag placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArtistRole {
    Main,
    Featuring,
    Producer,
    Remixer,
}

impl ArtistRole {
    pub fn as_str(self) -> &'static str {
        match self {
            ArtistRole::Main => "Main",
            ArtistRole::Featuring => "Featuring",
            ArtistRole::Producer => "Producer",
            ArtistRole::Remixer => "Remixer",
        }
    }
}

impl fmt::Display for ArtistRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transformation keyword attached to a Remixer credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RemixType {
    #[default]
    Remix,
    Flip,
    Bootleg,
    Mashup,
    Edit,
}

impl RemixType {
    pub fn as_str(self) -> &'static str {
        match self {
            RemixType::Remix => "Remix",
            RemixType::Flip => "Flip",
            RemixType::Bootleg => "Bootleg",
            RemixType::Mashup => "Mashup",
            RemixType::Edit => "Edit",
        }
    }

    /// Case-insensitive keyword lookup. Unknown keywords fall back to `Remix`.
    pub fn from_keyword(keyword: &str) -> Self {
        keyword.parse().unwrap_or_default()
    }
}

impl fmt::Display for RemixType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no remix type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRemixType(pub String);

impl fmt::Display for UnknownRemixType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown remix type '{}'", self.0)
    }
}

impl std::error::Error for UnknownRemixType {}

impl FromStr for RemixType {
    type Err = UnknownRemixType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "remix" => Ok(RemixType::Remix),
            "flip" => Ok(RemixType::Flip),
            "bootleg" => Ok(RemixType::Bootleg),
            "mashup" => Ok(RemixType::Mashup),
            "edit" => Ok(RemixType::Edit),
            _ => Err(UnknownRemixType(s.to_string())),
        }
    }
}

// ============================================================================
// Extraction Models
// ============================================================================

/// One credited artist. `remix_type` is only set for `ArtistRole::Remixer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub name: String,
    pub role: ArtistRole,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub remix_type: Option<RemixType>,
}

impl Artist {
    pub fn new(name: impl Into<String>, role: ArtistRole) -> Self {
        Self {
            name: name.into(),
            role,
            remix_type: None,
        }
    }

    pub fn remixer(name: impl Into<String>, remix_type: RemixType) -> Self {
        Self {
            name: name.into(),
            role: ArtistRole::Remixer,
            remix_type: Some(remix_type),
        }
    }
}

/// Remixers named by one credit fragment, all sharing its remix type.
/// Names are as credited, so a self-remix keeps its remixer here even
/// when dedup folds that name into an earlier Main entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemixCredit {
    pub names: Vec<String>,
    pub remix_type: RemixType,
}

/// Canonical title plus the ordered, deduplicated artist list.
/// Built once per (title, username) pair and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub title: String,
    pub artists: Vec<Artist>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub remix: Option<RemixCredit>,
    /// No artist came from the title; the only artist is the uploader.
    #[serde(default)]
    pub uploader_fallback: bool,
}

impl ExtractionResult {
    /// Artists with the given role, in discovery order.
    pub fn artists_by_role(&self, role: ArtistRole) -> impl Iterator<Item = &Artist> + '_ {
        self.artists.iter().filter(move |a| a.role == role)
    }

    /// Remix type of the credit fragment, if a remix was credited.
    pub fn remix_type(&self) -> Option<RemixType> {
        self.remix.as_ref().map(|credit| credit.remix_type)
    }
}

// ============================================================================
// Batch Models
// ============================================================================

/// One batch input record (a JSON line).
#[derive(Clone, Debug, Deserialize)]
pub struct TrackInput {
    pub title: String,
    #[serde(default)]
    pub username: String,
}

/// One batch output record: the structured result plus its display strings.
#[derive(Clone, Debug, Serialize)]
pub struct TrackOutput {
    pub source_title: String,
    pub username: String,
    #[serde(flatten)]
    pub result: ExtractionResult,
    pub display_title: String,
    pub display_artists: String,
    pub file_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remix_type_from_keyword() {
        assert_eq!(RemixType::from_keyword("FLIP"), RemixType::Flip);
        assert_eq!(RemixType::from_keyword("bootleg"), RemixType::Bootleg);
        assert_eq!(RemixType::from_keyword("Mashup"), RemixType::Mashup);
        assert_eq!(RemixType::from_keyword("edit"), RemixType::Edit);
        assert_eq!(RemixType::from_keyword("rework"), RemixType::Remix);
    }

    #[test]
    fn test_remix_type_parse_error() {
        let err = "vip".parse::<RemixType>().unwrap_err();
        assert_eq!(err.to_string(), "unknown remix type 'vip'");
    }

    #[test]
    fn test_result_role_queries() {
        let result = ExtractionResult {
            title: "Song".to_string(),
            artists: vec![
                Artist::new("A", ArtistRole::Main),
                Artist::remixer("E", RemixType::Flip),
                Artist::remixer("F", RemixType::Flip),
            ],
            remix: Some(RemixCredit {
                names: vec!["E".to_string(), "F".to_string()],
                remix_type: RemixType::Flip,
            }),
            uploader_fallback: false,
        };
        let remixers: Vec<&str> = result
            .artists_by_role(ArtistRole::Remixer)
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(remixers, vec!["E", "F"]);
        assert_eq!(result.remix_type(), Some(RemixType::Flip));
    }

    #[test]
    fn test_artist_serialization_skips_absent_remix_type() {
        let json = serde_json::to_string(&Artist::new("A", ArtistRole::Main)).unwrap();
        assert_eq!(json, r#"{"name":"A","role":"Main"}"#);
    }
}
