//! Professional summary selection

use crate::error::{Result, TailorError};
use crate::processing::lexical;
use crate::processing::text_processor::JobDescription;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summary key -> summary text
pub type SummaryBank = BTreeMap<String, String>;

/// Key preferred when no summary scores above zero
pub const GENERAL_SUMMARY_KEY: &str = "general";

const SIGNAL_WEIGHT: f32 = 2.0;
const BROAD_KEYWORD_WEIGHT: f32 = 0.5;

/// A posting signal: when `pattern` matches the job text, summaries keyed
/// `tag` earn [`SIGNAL_WEIGHT`].
struct SignalGroup {
    tag: &'static str,
    pattern: Regex,
}

static SIGNAL_GROUPS: Lazy<Vec<SignalGroup>> = Lazy::new(|| {
    [
        ("soc", r"\bsoc\b|security operations cent(?:er|re)"),
        ("soc", r"\bsiem\b|splunk|qradar|sentinel"),
        ("soc", r"threat hunting|threat detection|alert triage"),
        ("soc", r"24/7 monitoring|log analysis|security monitoring"),
        ("incident_response", r"incident response|incident handling"),
        ("incident_response", r"forensic|\bdfir\b|malware analysis"),
        ("incident_response", r"breach investigation|root cause analysis"),
        ("appsec", r"application security|\bappsec\b"),
        ("appsec", r"owasp|secure code review|secure coding|\bsast\b|\bdast\b"),
        ("appsec", r"full[- ]stack|web application|api security"),
        ("appsec", r"\bdeveloper\b|software engineer|devsecops"),
        ("healthcare", r"healthcare|hospital|clinical|patient"),
        ("healthcare", r"\bhipaa\b|\bphi\b|\behr\b|epic systems"),
        ("cloud", r"cloud security|\baws\b|\bazure\b|\bgcp\b"),
        ("cloud", r"kubernetes|container security|terraform|\biam\b"),
        ("network", r"network security|firewall|ids/ips|\bvpn\b"),
        ("network", r"packet analysis|wireshark|network traffic"),
        ("vulnerability", r"vulnerability management|vulnerability assessment|penetration test"),
        ("vulnerability", r"nessus|qualys|patch management|\bcve\b"),
        ("compliance", r"compliance|nist 800-53|iso 27001|soc 2|\baudit"),
        ("general", r"entry[- ]level|\bjunior\b|generalist|analyst i\b"),
    ]
    .into_iter()
    .map(|(tag, pattern)| SignalGroup {
        tag,
        pattern: Regex::new(pattern).unwrap(),
    })
    .collect()
});

/// Terms that earn a small bonus when both the summary and the posting use them
const BROAD_KEYWORDS: [&str; 18] = [
    "splunk",
    "siem",
    "threat hunting",
    "incident response",
    "appsec",
    "web",
    "secure",
    "application",
    "healthcare",
    "network",
    "cloud",
    "compliance",
    "python",
    "automation",
    "vulnerability",
    "forensics",
    "monitoring",
    "risk",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarySelection {
    pub key: String,
    pub text: String,
    /// Winning score over the sum of all scores, in [0, 1]
    pub confidence: f32,
}

/// Score one summary against the lowercased posting
pub fn score_summary(key: &str, text: &str, job_lower: &str) -> f32 {
    let key_lower = key.to_lowercase();
    let summary_lower = text.to_lowercase();

    let signal_score: f32 = SIGNAL_GROUPS
        .iter()
        .filter(|group| group.tag == key_lower)
        .filter(|group| lexical::matches_pattern(job_lower, &group.pattern))
        .map(|_| SIGNAL_WEIGHT)
        .sum();

    let broad_score = BROAD_KEYWORDS
        .iter()
        .filter(|keyword| lexical::contains(&summary_lower, keyword) && lexical::contains(job_lower, keyword))
        .count() as f32
        * BROAD_KEYWORD_WEIGHT;

    signal_score + broad_score
}

/// Pick the summary that best fits the posting.
///
/// Exact ties go to the lexicographically smallest key. When every summary
/// scores zero the `general` summary is returned if the bank has one.
/// Fails only when the bank is empty.
pub fn select_best_summary(bank: &SummaryBank, job: &JobDescription) -> Result<SummarySelection> {
    if bank.is_empty() {
        return Err(TailorError::NoCandidates("summary bank is empty".to_string()));
    }

    let job_lower = job.lowered();
    let scores: Vec<(&String, f32)> = bank
        .iter()
        .map(|(key, text)| (key, score_summary(key, text, job_lower)))
        .collect();

    let total: f32 = scores.iter().map(|(_, score)| score).sum();

    let mut best = scores[0];
    for &(key, score) in &scores[1..] {
        if score > best.1 {
            best = (key, score);
        }
    }

    if total == 0.0 {
        if let Some((key, _)) = bank.get_key_value(GENERAL_SUMMARY_KEY) {
            best = (key, 0.0);
        }
    }

    let confidence = if total > 0.0 { best.1 / total } else { 0.0 };

    debug!(
        "Summary scores: {} -> '{}' ({:.2})",
        scores
            .iter()
            .map(|(key, score)| format!("{}={:.1}", key, score))
            .collect::<Vec<_>>()
            .join(", "),
        best.0,
        confidence
    );

    Ok(SummarySelection {
        key: best.0.clone(),
        text: bank[best.0].clone(),
        confidence,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank() -> SummaryBank {
        [
            ("general", "Cybersecurity analyst with hands-on lab experience."),
            ("appsec", "Full-stack developer with a secure web application focus."),
            ("soc", "SIEM specialist with Splunk and threat hunting expertise."),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_soc_posting_selects_soc_summary() {
        let job = JobDescription::new("Looking for a SOC analyst with Splunk and threat hunting skills");
        let selection = select_best_summary(&bank(), &job).unwrap();
        assert_eq!(selection.key, "soc");
        assert!(selection.text.contains("SIEM specialist"));
        assert!(selection.confidence > 0.5 && selection.confidence <= 1.0);
    }

    #[test]
    fn test_appsec_posting_selects_appsec_summary() {
        let job = JobDescription::new("Application security engineer to run OWASP secure code review on our web application");
        let selection = select_best_summary(&bank(), &job).unwrap();
        assert_eq!(selection.key, "appsec");
    }

    #[test]
    fn test_signal_contributes_once_per_group() {
        // Both alternatives of the first soc group appear; the group still counts once
        let score = score_summary("soc", "", "soc analyst in a security operations center");
        assert_eq!(score, SIGNAL_WEIGHT);
    }

    #[test]
    fn test_broad_keywords_need_both_sides() {
        let score = score_summary("other", "Python automation for cloud", "cloud and python");
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_all_zero_prefers_general() {
        let job = JobDescription::new("Barista wanted for morning shifts");
        let selection = select_best_summary(&bank(), &job).unwrap();
        assert_eq!(selection.key, "general");
        assert_eq!(selection.confidence, 0.0);
    }

    #[test]
    fn test_all_zero_without_general_returns_smallest_key() {
        let mut bank = bank();
        bank.remove("general");
        let job = JobDescription::new("Barista wanted for morning shifts");
        let selection = select_best_summary(&bank, &job).unwrap();
        assert_eq!(selection.key, "appsec");
        assert_eq!(selection.confidence, 0.0);
    }

    #[test]
    fn test_empty_bank_is_an_error() {
        let job = JobDescription::new("anything");
        let err = select_best_summary(&SummaryBank::new(), &job).unwrap_err();
        assert!(matches!(err, TailorError::NoCandidates(_)));
    }

    #[test]
    fn test_confidence_bounds() {
        for text in ["", "soc siem splunk", "healthcare hipaa", "cloud aws network firewall"] {
            let selection = select_best_summary(&bank(), &JobDescription::new(text)).unwrap();
            assert!((0.0..=1.0).contains(&selection.confidence));
        }
    }
}
