//! Primitive keyword presence checks used by every scorer.
//!
//! All functions here are case-sensitive on purpose: callers lowercase both
//! the haystack and the needle before calling in.

use aho_corasick::AhoCorasick;
use regex::Regex;

/// Plain substring presence
pub fn contains(haystack: &str, needle: &str) -> bool {
    haystack.contains(needle)
}

/// Whole-word presence. Both sides are padded with one space before the
/// substring test, so `needle` must not carry its own outer whitespace.
pub fn contains_word(haystack: &str, needle: &str) -> bool {
    format!(" {} ", haystack).contains(&format!(" {} ", needle))
}

/// Presence of `needle` wrapped in double quotes
pub fn contains_quoted(haystack: &str, needle: &str) -> bool {
    haystack.contains(&format!("\"{}\"", needle))
}

/// Regex presence
pub fn matches_pattern(haystack: &str, pattern: &Regex) -> bool {
    pattern.is_match(haystack)
}

/// True if any needle occurs in the haystack
pub fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Multi-needle matcher compiled once and reused across calls.
///
/// Used for the fixed keyword groups (company size, industry, value tags)
/// that are checked against every job description.
pub struct KeywordGroup {
    matcher: AhoCorasick,
    keywords: Vec<&'static str>,
}

impl KeywordGroup {
    pub fn new(keywords: &[&'static str]) -> Self {
        let matcher = AhoCorasick::new(keywords)
            .expect("keyword group patterns are static and always valid");
        Self {
            matcher,
            keywords: keywords.to_vec(),
        }
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.matcher.is_match(haystack)
    }

    /// First keyword (by position in the haystack) that matched
    pub fn first_match(&self, haystack: &str) -> Option<&'static str> {
        self.matcher
            .find(haystack)
            .map(|mat| self.keywords[mat.pattern().as_usize()])
    }

    pub fn keywords(&self) -> &[&'static str] {
        &self.keywords
    }
}
