//! Credit-fragment extraction: producer, featuring and remix credits.
//!
//! Each credit kind is an ordered list of patterns tried in fixed priority
//! order (parenthesized, bracketed, then bare where one exists). The first
//! pattern that yields at least one name wins and its fragment is cut out
//! of the title. Callers must run producer, then feature, then remix: the
//! bare patterns rely on earlier fragments already being gone.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::trace;

use crate::models::{RemixCredit, RemixType};
use crate::segment::split_artists;

// ============================================================================
// Pattern Lists
// ============================================================================

/// An optional cheap existence probe plus the ordered fragment patterns.
/// Every fragment pattern has a `names` group; remix patterns add `kind`.
/// A trailing `keep` group is matched but not cut: bare credits must end at
/// the end of the title or at an opening bracket, which stays in place.
pub struct FragmentPatterns {
    pub label: &'static str,
    pub probe: Option<Regex>,
    pub patterns: Vec<Regex>,
}

/// A fragment that matched: the title with it removed, plus what it named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentMatch {
    pub title: String,
    pub names: Vec<String>,
    pub keyword: Option<String>,
    pub pattern_index: usize,
}

impl FragmentPatterns {
    fn new(label: &'static str, probe: Option<&str>, patterns: &[&str]) -> Self {
        Self {
            label,
            probe: probe.map(|p| Regex::new(p).unwrap()),
            patterns: patterns.iter().map(|p| Regex::new(p).unwrap()).collect(),
        }
    }

    /// First accepted match across the ordered patterns, or `None`.
    pub fn extract(&self, title: &str) -> Option<FragmentMatch> {
        self.extract_where(title, |_| true)
    }

    /// Like [`extract`](Self::extract), but `accept` may veto a match so
    /// the search moves on to the next pattern.
    pub fn extract_where<F>(&self, title: &str, accept: F) -> Option<FragmentMatch>
    where
        F: Fn(&Captures) -> bool,
    {
        if let Some(probe) = &self.probe {
            if !probe.is_match(title) {
                return None;
            }
        }

        for (index, pattern) in self.patterns.iter().enumerate() {
            for caps in pattern.captures_iter(title) {
                if let Some(found) = self.accept_fragment(title, index, &caps, &accept) {
                    return Some(found);
                }
            }
        }
        None
    }

    fn accept_fragment<F>(
        &self,
        title: &str,
        index: usize,
        caps: &Captures,
        accept: &F,
    ) -> Option<FragmentMatch>
    where
        F: Fn(&Captures) -> bool,
    {
        let names: Vec<String> = caps
            .name("names")
            .map(|m| split_artists(m.as_str()))
            .unwrap_or_default()
            .into_iter()
            .filter(|name| !is_placeholder_name(name))
            .collect();
        if names.is_empty() || !accept(caps) {
            trace!(kind = self.label, pattern = index, "fragment rejected");
            return None;
        }
        let whole = caps.get(0)?;
        let end = caps.name("keep").map_or(whole.end(), |keep| keep.start());
        trace!(kind = self.label, pattern = index, fragment = &title[whole.start()..end], "fragment matched");
        Some(FragmentMatch {
            title: format!("{}{}", &title[..whole.start()], &title[end..]),
            names,
            keyword: caps.name("kind").map(|m| m.as_str().to_string()),
            pattern_index: index,
        })
    }
}

/// Keywords the optional parts of a pattern can leave behind as a "name"
/// when the credit itself is empty, as in "(Prod. by)".
const CREDIT_KEYWORDS: &[&str] = &["by", "prod", "produced", "feat", "ft", "featuring", "w/"];

/// Leftover punctuation or a bare credit keyword, not an artist.
fn is_placeholder_name(name: &str) -> bool {
    !name.chars().any(char::is_alphanumeric)
        || CREDIT_KEYWORDS.contains(&name.to_lowercase().as_str())
}

/// "(Prod. by X)", "[Prod X]", then a bare "prod. X" with no bracket.
pub static PRODUCER_PATTERNS: Lazy<FragmentPatterns> = Lazy::new(|| {
    FragmentPatterns::new(
        "producer",
        None,
        &[
            r"(?i)\s*\(\s*prod(?:uced)?\b\.?\s*(?:by\b\.?\s*)?(?P<names>[^()]+?)\s*\)",
            r"(?i)\s*\[\s*prod(?:uced)?\b\.?\s*(?:by\b\.?\s*)?(?P<names>[^\[\]]+?)\s*\]",
            r"(?i)(?:^|\s+)prod(?:uced)?\b\.?\s*(?:by\b\.?\s*)?(?P<names>[^()\[\]]*[^()\[\]\s])(?P<keep>\s*(?:$|[(\[]))",
        ],
    )
});

/// Featuring credits in the title. A spaced " x " counts as featuring here.
pub static FEATURE_PATTERNS: Lazy<FragmentPatterns> = Lazy::new(|| {
    FragmentPatterns::new(
        "feature",
        Some(r"(?i)\b(?:featuring|feat|ft)\b|\bw/|\sx\s"),
        &[
            r"(?i)\s*\(\s*(?:(?:featuring|feat|ft)\b\.?|w/)\s*(?P<names>[^()]+?)\s*\)",
            r"(?i)\s*\[\s*(?:(?:featuring|feat|ft)\b\.?|w/)\s*(?P<names>[^\[\]]+?)\s*\]",
            r"(?i)(?:(?:^|\s+)(?:(?:featuring|feat|ft)\b\.?|w/)|\s+x\s)\s*(?P<names>[^()\[\]]*[^()\[\]\s])(?P<keep>\s*(?:$|[(\[]))",
        ],
    )
});

/// Featuring credits inside a leading artist block, where " x " is a plain
/// conjunction ("A x B - Song" credits two main artists).
pub static LEADING_FEATURE_PATTERNS: Lazy<FragmentPatterns> = Lazy::new(|| {
    FragmentPatterns::new(
        "leading-feature",
        Some(r"(?i)\b(?:featuring|feat|ft)\b|\bw/"),
        &[
            r"(?i)\s*\(\s*(?:(?:featuring|feat|ft)\b\.?|w/)\s*(?P<names>[^()]+?)\s*\)",
            r"(?i)\s*\[\s*(?:(?:featuring|feat|ft)\b\.?|w/)\s*(?P<names>[^\[\]]+?)\s*\]",
            r"(?i)(?:^|\s+)(?:(?:featuring|feat|ft)\b\.?|w/)\s*(?P<names>[^()\[\]]*[^()\[\]\s])(?P<keep>\s*(?:$|[(\[]))",
        ],
    )
});

/// "(<names> Remix)" then "[<names> Flip]"; the keyword must close the bracket.
pub static REMIX_PATTERNS: Lazy<FragmentPatterns> = Lazy::new(|| {
    FragmentPatterns::new(
        "remix",
        Some(r"(?i)\b(?:remix|flip|bootleg|mashup|edit)\b"),
        &[
            r"(?i)\s*\(\s*(?P<names>[^()]*?)\s*\b(?P<kind>remix|flip|bootleg|mashup|edit)\s*\)",
            r"(?i)\s*\[\s*(?P<names>[^\[\]]*?)\s*\b(?P<kind>remix|flip|bootleg|mashup|edit)\s*\]",
        ],
    )
});

/// Words that describe a version rather than name a remixer ("Radio Edit").
const VERSION_DESCRIPTORS: &[&str] = &[
    "radio", "extended", "original", "club", "vip", "dub", "instrumental", "official", "short",
    "quick",
];

fn is_version_descriptor(names: &str) -> bool {
    let mut words = names.split_whitespace().peekable();
    words.peek().is_some()
        && words.all(|w| VERSION_DESCRIPTORS.contains(&w.to_lowercase().as_str()))
}

// ============================================================================
// Extractors
// ============================================================================

/// Strip a producer credit. Returns the new title and the producer names.
pub fn extract_producers(title: &str) -> (String, Vec<String>) {
    match PRODUCER_PATTERNS.extract(title) {
        Some(m) => (m.title, m.names),
        None => (title.to_string(), Vec::new()),
    }
}

/// Strip a featuring credit from a (producer-stripped) title.
pub fn extract_features(title: &str) -> (String, Vec<String>) {
    match FEATURE_PATTERNS.extract(title) {
        Some(m) => (m.title, m.names),
        None => (title.to_string(), Vec::new()),
    }
}

/// Strip a featuring credit from a leading artist block.
pub fn extract_leading_features(segment: &str) -> (String, Vec<String>) {
    match LEADING_FEATURE_PATTERNS.extract(segment) {
        Some(m) => (m.title, m.names),
        None => (segment.to_string(), Vec::new()),
    }
}

/// Strip a remix credit from a (feature-stripped) title.
/// Version descriptors such as "(Radio Edit)" are left in place.
pub fn extract_remixers(title: &str) -> (String, Option<RemixCredit>) {
    let found = REMIX_PATTERNS.extract_where(title, |caps| {
        caps.name("names")
            .is_some_and(|m| !is_version_descriptor(m.as_str()))
    });
    match found {
        Some(m) => {
            let remix_type = m
                .keyword
                .as_deref()
                .map(RemixType::from_keyword)
                .unwrap_or_default();
            (
                m.title,
                Some(RemixCredit {
                    names: m.names,
                    remix_type,
                }),
            )
        }
        None => (title.to_string(), None),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_producer_parenthesized() {
        assert_eq!(
            extract_producers("Song (Prod. by D)"),
            ("Song".to_string(), vec!["D".to_string()])
        );
        assert_eq!(
            extract_producers("Song (prod D & E)"),
            ("Song".to_string(), vec!["D".to_string(), "E".to_string()])
        );
        assert_eq!(
            extract_producers("Song (Produced by Byron)"),
            ("Song".to_string(), vec!["Byron".to_string()])
        );
    }

    #[test]
    fn test_producer_bracketed_and_bare() {
        assert_eq!(
            extract_producers("Song [Prod. D]"),
            ("Song".to_string(), vec!["D".to_string()])
        );
        assert_eq!(
            extract_producers("Song prod. by D"),
            ("Song".to_string(), vec!["D".to_string()])
        );
        // Bare credit stops at the next bracket
        assert_eq!(
            extract_producers("Song prod. D (E Remix)"),
            ("Song (E Remix)".to_string(), vec!["D".to_string()])
        );
    }

    #[test]
    fn test_producer_priority_order() {
        let m = PRODUCER_PATTERNS.extract("Song [Prod. X] (Prod. Y)").unwrap();
        assert_eq!(m.pattern_index, 0);
        assert_eq!(m.names, vec!["Y"]);
        assert_eq!(m.title, "Song [Prod. X]");
    }

    #[test]
    fn test_empty_credits_name_nobody() {
        for title in ["Song (Prod.)", "Song (Prod. by)", "Song [prod by]", "Song (feat.)", "Song [ft.]", "Song (w/)"] {
            assert_eq!(
                extract_producers(title),
                (title.to_string(), Vec::<String>::new()),
                "producer in {:?}",
                title
            );
            assert_eq!(
                extract_features(title),
                (title.to_string(), Vec::<String>::new()),
                "feature in {:?}",
                title
            );
        }
        assert_eq!(
            extract_leading_features("A (feat.)"),
            ("A (feat.)".to_string(), Vec::<String>::new())
        );
    }

    #[test]
    fn test_bare_credits_at_title_start() {
        assert_eq!(
            extract_producers("prod. D"),
            (String::new(), vec!["D".to_string()])
        );
        assert_eq!(
            extract_features("feat. C"),
            (String::new(), vec!["C".to_string()])
        );
        assert_eq!(
            extract_features("ft C (E Remix)"),
            (" (E Remix)".to_string(), vec!["C".to_string()])
        );
        // A leading "x" is a word, not a featuring marker
        assert_eq!(
            extract_features("X Gon Give It"),
            ("X Gon Give It".to_string(), Vec::<String>::new())
        );
        assert_eq!(
            extract_producers("Prodigy Anthem"),
            ("Prodigy Anthem".to_string(), Vec::<String>::new())
        );
    }

    #[test]
    fn test_producer_no_match() {
        assert_eq!(
            extract_producers("Product Placement"),
            ("Product Placement".to_string(), Vec::<String>::new())
        );
        assert_eq!(
            extract_producers("Prodigy (Live)"),
            ("Prodigy (Live)".to_string(), Vec::<String>::new())
        );
    }

    #[test]
    fn test_features_all_shapes() {
        assert_eq!(
            extract_features("Song (feat. C)"),
            ("Song".to_string(), vec!["C".to_string()])
        );
        assert_eq!(
            extract_features("Song [ft. C & D]"),
            ("Song".to_string(), vec!["C".to_string(), "D".to_string()])
        );
        assert_eq!(
            extract_features("Song featuring C, D"),
            ("Song".to_string(), vec!["C".to_string(), "D".to_string()])
        );
        assert_eq!(
            extract_features("Song w/ C"),
            ("Song".to_string(), vec!["C".to_string()])
        );
        assert_eq!(
            extract_features("Song x C"),
            ("Song".to_string(), vec!["C".to_string()])
        );
    }

    #[test]
    fn test_features_keep_trailing_brackets() {
        assert_eq!(
            extract_features("Song ft. C (E Remix)"),
            ("Song (E Remix)".to_string(), vec!["C".to_string()])
        );
    }

    #[test]
    fn test_bare_credits_stay_outside_brackets() {
        assert_eq!(
            extract_features("Song (E x F Remix)"),
            ("Song (E x F Remix)".to_string(), Vec::<String>::new())
        );
        assert_eq!(
            extract_producers("Song (Live prod session)"),
            ("Song (Live prod session)".to_string(), Vec::<String>::new())
        );
        assert_eq!(
            extract_features("Song (E x F Remix) x G"),
            ("Song (E x F Remix)".to_string(), vec!["G".to_string()])
        );
    }

    #[test]
    fn test_features_probe_rejects() {
        assert_eq!(
            extract_features("Feathers (Original)"),
            ("Feathers (Original)".to_string(), Vec::<String>::new())
        );
        assert!(FEATURE_PATTERNS.extract("Maxed Out").is_none());
    }

    #[test]
    fn test_leading_features_ignore_x() {
        assert_eq!(
            extract_leading_features("A x B"),
            ("A x B".to_string(), Vec::<String>::new())
        );
        assert_eq!(
            extract_leading_features("A & B feat. C"),
            ("A & B".to_string(), vec!["C".to_string()])
        );
    }

    #[test]
    fn test_remix_types() {
        let (title, credit) = extract_remixers("Song (E Remix)");
        assert_eq!(title, "Song");
        let credit = credit.unwrap();
        assert_eq!(credit.names, vec!["E"]);
        assert_eq!(credit.remix_type, RemixType::Remix);

        let (title, credit) = extract_remixers("Song [E & F flip]");
        assert_eq!(title, "Song");
        let credit = credit.unwrap();
        assert_eq!(credit.names, vec!["E", "F"]);
        assert_eq!(credit.remix_type, RemixType::Flip);

        let (_, credit) = extract_remixers("Song (E x F Bootleg)");
        assert_eq!(credit.unwrap().remix_type, RemixType::Bootleg);
        let (_, credit) = extract_remixers("Song (E Mashup)");
        assert_eq!(credit.unwrap().remix_type, RemixType::Mashup);
        let (_, credit) = extract_remixers("Song (E EDIT)");
        assert_eq!(credit.unwrap().remix_type, RemixType::Edit);
    }

    #[test]
    fn test_remix_version_descriptors_stay() {
        assert_eq!(
            extract_remixers("Song (Radio Edit)"),
            ("Song (Radio Edit)".to_string(), None)
        );
        assert_eq!(
            extract_remixers("Song (Remix)"),
            ("Song (Remix)".to_string(), None)
        );
        let (title, credit) = extract_remixers("Song (Radio Edit) (E Remix)");
        assert_eq!(title, "Song (Radio Edit)");
        assert_eq!(credit.unwrap().names, vec!["E"]);
        let (title, credit) = extract_remixers("Song (Radio Edit) [E Remix]");
        assert_eq!(title, "Song (Radio Edit)");
        assert_eq!(credit.unwrap().names, vec!["E"]);
    }

    #[test]
    fn test_remix_keyword_must_trail() {
        assert_eq!(
            extract_remixers("Song (Remix Contest Entry)"),
            ("Song (Remix Contest Entry)".to_string(), None)
        );
        assert_eq!(extract_remixers("Remixed"), ("Remixed".to_string(), None));
    }
}
