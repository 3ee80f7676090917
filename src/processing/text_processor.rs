//! Job description normalization and keyword density checks

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Default ceiling for keyword density before text reads as stuffed
pub const DEFAULT_MAX_KEYWORD_DENSITY: f32 = 0.15;

/// A job posting as received, plus the lowercased form every scorer matches against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDescription {
    raw: String,
    lowered: String,
}

impl JobDescription {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let lowered = normalize_unicode(&raw).to_lowercase();
        Self { raw, lowered }
    }

    pub fn empty() -> Self {
        Self::new(String::new())
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn lowered(&self) -> &str {
        &self.lowered
    }

    pub fn is_empty(&self) -> bool {
        self.raw.trim().is_empty()
    }

    /// Number of words in the posting (Unicode word boundaries)
    pub fn word_count(&self) -> usize {
        self.raw.unicode_words().count()
    }
}

impl From<&str> for JobDescription {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for JobDescription {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

/// Result of a keyword density check
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DensityReport {
    pub is_valid: bool,
    pub density: f32,
}

/// Check that the combined occurrence count of `keywords` does not exceed
/// `max_density` of the whitespace-separated word count of `text`.
///
/// Occurrences are counted case-insensitively and non-overlapping per
/// keyword; empty text has density 0.
pub fn validate_keyword_density(text: &str, keywords: &[String], max_density: f32) -> DensityReport {
    let text_lower = text.to_lowercase();
    let total_words = text_lower.split_whitespace().count();

    let keyword_count: usize = keywords
        .iter()
        .map(|keyword| keyword.to_lowercase())
        .filter(|keyword| !keyword.is_empty())
        .map(|keyword| text_lower.matches(keyword.as_str()).count())
        .sum();

    let density = if total_words > 0 {
        keyword_count as f32 / total_words as f32
    } else {
        0.0
    };

    DensityReport {
        is_valid: density <= max_density,
        density,
    }
}

/// Collapse runs of whitespace (tabs, newlines) to single spaces
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}

/// Fold typographic punctuation into ASCII so quoted-phrase and hyphenated
/// keywords match regardless of how the posting was typeset.
pub fn normalize_unicode(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2013}' | '\u{2014}' => '-',
            '\u{00A0}' => ' ',
            _ => c,
        })
        .collect()
}
