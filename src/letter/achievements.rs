//! Achievement-to-requirement matching

use crate::processing::lexical;
use crate::processing::metrics::MetricsRecord;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static NUMERIC_EVIDENCE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+%|\d+\+|\$\d+").unwrap());

/// Default number of proof points pulled into a cover letter
pub const DEFAULT_TOP_N: usize = 2;

const EXACT_PHRASE_SCORE: f32 = 3.0;
const NUMERIC_BONUS: f32 = 0.5;
const CONFIDENCE_CAP: f32 = 5.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "MetricsRecord::is_empty")]
    pub metrics: MetricsRecord,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Achievement {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementMatch {
    pub requirement: String,
    /// Achievement description as written in the profile
    pub achievement: String,
    pub confidence: f32,
}

/// Raw (uncapped) score of one achievement against one lowercased requirement
pub fn score_achievement(requirement_lower: &str, achievement_lower: &str) -> f32 {
    let mut score = if lexical::contains(achievement_lower, requirement_lower) {
        EXACT_PHRASE_SCORE
    } else {
        requirement_lower
            .split_whitespace()
            .filter(|word| lexical::contains(achievement_lower, word))
            .count() as f32
    };

    if lexical::matches_pattern(achievement_lower, &NUMERIC_EVIDENCE_RE) {
        score += NUMERIC_BONUS;
    }

    score
}

/// Best supporting achievement per requirement, strongest `top_n` overall.
///
/// The first achievement reaching the best score wins ties; requirements
/// with no positive score produce no match. Results are sorted by
/// confidence, keeping requirement order among equals.
pub fn select_proof_examples(
    achievements: &[Achievement],
    requirements: &[String],
    top_n: usize,
) -> Vec<RequirementMatch> {
    if achievements.is_empty() || requirements.is_empty() {
        return Vec::new();
    }

    let lowered: Vec<String> = achievements
        .iter()
        .map(|a| a.description.to_lowercase())
        .collect();

    let mut matches: Vec<RequirementMatch> = requirements
        .iter()
        .filter_map(|requirement| {
            let requirement_lower = requirement.to_lowercase();
            let mut best: Option<(usize, f32)> = None;

            for (idx, achievement_lower) in lowered.iter().enumerate() {
                if achievement_lower.is_empty() {
                    continue;
                }
                let score = score_achievement(&requirement_lower, achievement_lower);
                let best_score = best.map(|(_, s)| s).unwrap_or(0.0);
                if score > best_score {
                    best = Some((idx, score));
                }
            }

            best.map(|(idx, score)| RequirementMatch {
                requirement: requirement.clone(),
                achievement: achievements[idx].description.clone(),
                confidence: (score / CONFIDENCE_CAP).min(1.0),
            })
        })
        .collect();

    matches.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    matches.truncate(top_n);

    debug!(
        "Matched {} of {} requirements to achievements",
        matches.len(),
        requirements.len()
    );

    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reqs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_exact_phrase_with_numeric_bonus() {
        let achievements = vec![Achievement::new("Led incident response for 50+ incidents")];
        let matches = select_proof_examples(&achievements, &reqs(&["incident response"]), DEFAULT_TOP_N);

        assert_eq!(matches.len(), 1);
        assert!(matches[0].confidence > 0.5);
        assert!((matches[0].confidence - 0.7).abs() < 1e-6);
        assert_eq!(matches[0].achievement, "Led incident response for 50+ incidents");
    }

    #[test]
    fn test_word_overlap_scoring() {
        assert_eq!(score_achievement("team training", "trained 12 analysts on forensics"), 0.0);
        assert_eq!(score_achievement("analyst training", "trained 12 analysts on forensics"), 1.0);
        assert_eq!(score_achievement("forensics", "cut costs by $4000 with forensics"), 3.5);
    }

    #[test]
    fn test_sorted_and_capped() {
        let achievements = vec![
            Achievement::new("Trained 12 analysts on forensics"),
            Achievement::new("Led incident response for 50+ incidents"),
            Achievement::new("Reduced phishing clicks by 40% with awareness training"),
        ];
        let requirements = reqs(&["forensics", "incident response", "phishing awareness", "budgeting"]);
        let matches = select_proof_examples(&achievements, &requirements, 2);

        assert_eq!(matches.len(), 2);
        for pair in matches.windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence);
        }
        assert_eq!(matches[0].requirement, "incident response");
        assert_eq!(matches[1].requirement, "forensics");
        assert!((matches[1].confidence - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_first_seen_wins_ties() {
        let achievements = vec![
            Achievement::new("Built SIEM dashboards"),
            Achievement::new("Tuned SIEM correlation rules"),
        ];
        let matches = select_proof_examples(&achievements, &reqs(&["siem"]), 2);
        assert_eq!(matches[0].achievement, "Built SIEM dashboards");
    }

    #[test]
    fn test_unmatched_and_empty_inputs() {
        let achievements = vec![Achievement::new("Wrote Python tooling"), Achievement::new("")];
        assert!(select_proof_examples(&achievements, &reqs(&["kubernetes"]), 2).is_empty());
        assert!(select_proof_examples(&[], &reqs(&["siem"]), 2).is_empty());
        assert!(select_proof_examples(&achievements, &[], 2).is_empty());
    }

    #[test]
    fn test_confidence_is_capped() {
        let achievements = vec![Achievement::new("siem siem detection engineering across 100% of hosts")];
        let matches = select_proof_examples(
            &achievements,
            &reqs(&["siem detection engineering across hosts plus extra words"]),
            1,
        );
        assert!(matches[0].confidence <= 1.0);
    }
}
