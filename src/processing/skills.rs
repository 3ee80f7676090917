//! Skill reordering by relevance to a job description
//!
//! ATS parsers read top-down, so the skills section leads with the skills the
//! posting actually names. Scoring is a strict three-tier ladder:
//!
//! | tier | condition                                           | score |
//! |------|-----------------------------------------------------|-------|
//! | 1    | quoted phrase or whole word in the posting          | 3     |
//! | 2    | bare substring of the posting                       | 2     |
//! | 3    | +1 per related keyword present (table lookup)       | 0..n  |
//!
//! Exactly one tier applies, checked in that order.

use crate::processing::lexical;
use crate::processing::text_processor::JobDescription;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default cap on ranked skills
pub const DEFAULT_MAX_SKILLS: usize = 12;

/// Category name -> skills in that category, as stored in the profile
pub type SkillCatalog = BTreeMap<String, Vec<String>>;

/// Related keywords that earn partial credit for a skill the posting does not name
const RELATED_KEYWORDS: &[(&str, &[&str])] = &[
    ("Splunk", &["siem", "log analysis", "monitoring"]),
    ("Wireshark", &["packet analysis", "network traffic", "protocol"]),
    ("Python", &["scripting", "automation", "programming"]),
    ("MITRE ATT&CK", &["tactics", "techniques", "threat modeling"]),
    ("NIST 800-53", &["compliance", "framework", "controls"]),
    ("Incident Response", &["ir", "incident handling", "response"]),
    ("Threat Hunting", &["hunting", "threat detection", "proactive"]),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredSkill {
    pub skill: String,
    pub score: u32,
}

/// Score a single skill against the lowercased posting
pub fn score_skill(skill: &str, job_lower: &str) -> u32 {
    let skill_lower = skill.to_lowercase();

    if lexical::contains_quoted(job_lower, &skill_lower) || lexical::contains_word(job_lower, &skill_lower) {
        return 3;
    }

    if lexical::contains(job_lower, &skill_lower) {
        return 2;
    }

    // Table keys are matched case-sensitively against the skill as given
    RELATED_KEYWORDS
        .iter()
        .find(|(name, _)| *name == skill)
        .map(|(_, related)| {
            related
                .iter()
                .filter(|keyword| lexical::contains(job_lower, keyword))
                .count() as u32
        })
        .unwrap_or(0)
}

/// Flatten the catalog, score every skill and return the top `max_skills`
/// by score (descending) then skill name (ascending).
pub fn rank_skills(catalog: &SkillCatalog, job: &JobDescription, max_skills: usize) -> Vec<ScoredSkill> {
    let job_lower = job.lowered();

    let mut scored: Vec<ScoredSkill> = catalog
        .values()
        .flatten()
        .map(|skill| ScoredSkill {
            skill: skill.clone(),
            score: score_skill(skill, job_lower),
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.skill.cmp(&b.skill)));
    scored.truncate(max_skills);

    debug!(
        "Ranked skills: {}",
        scored
            .iter()
            .map(|s| format!("{}={}", s.skill, s.score))
            .collect::<Vec<_>>()
            .join(", ")
    );

    scored
}

/// Skill names only, most relevant first
pub fn reorder_skills_by_job(catalog: &SkillCatalog, job: &JobDescription, max_skills: usize) -> Vec<String> {
    rank_skills(catalog, job, max_skills)
        .into_iter()
        .map(|scored| scored.skill)
        .collect()
}

/// Flatten without scoring, used when no posting is available
pub fn flatten_skills(catalog: &SkillCatalog, max_skills: usize) -> Vec<String> {
    catalog.values().flatten().take(max_skills).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(entries: &[(&str, &[&str])]) -> SkillCatalog {
        entries
            .iter()
            .map(|(category, skills)| {
                (
                    category.to_string(),
                    skills.iter().map(|s| s.to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_exact_match_beats_unmatched() {
        let skills = catalog(&[("tools", &["Splunk", "Python"])]);
        let job = JobDescription::new("We need Splunk SIEM expertise");
        let ranked = rank_skills(&skills, &job, DEFAULT_MAX_SKILLS);

        assert_eq!(ranked[0], ScoredSkill { skill: "Splunk".into(), score: 3 });
        assert_eq!(ranked[1], ScoredSkill { skill: "Python".into(), score: 0 });
    }

    #[test]
    fn test_score_ladder() {
        let job_lower = "experience with \"log analysis\" and splunking plus packet analysis of network traffic";
        assert_eq!(score_skill("Log Analysis", job_lower), 3);
        assert_eq!(score_skill("Splunk", job_lower), 2);
        assert_eq!(score_skill("Wireshark", job_lower), 2);
        assert_eq!(score_skill("Nessus", job_lower), 0);
    }

    #[test]
    fn test_curly_quotes_count_as_quoted() {
        let job = JobDescription::new("Hands-on with “Splunk” required");
        assert_eq!(score_skill("Splunk", job.lowered()), 3);
        // unfolded curly quotes are only a substring hit
        assert_eq!(score_skill("Splunk", "hands-on with “splunk” required"), 2);
    }

    #[test]
    fn test_related_tier_is_not_cumulative_with_substring() {
        // "python" is a substring here, so related keywords are never consulted
        let job_lower = "python scripting automation programming";
        assert_eq!(score_skill("Python", job_lower), 3);
        let job_lower = "pythonic scripting automation programming";
        assert_eq!(score_skill("Python", job_lower), 2);
    }

    #[test]
    fn test_related_tier_counts_each_keyword() {
        let job_lower = "strong scripting and automation background";
        assert_eq!(score_skill("Python", job_lower), 2);
        // Table keys are case-sensitive
        assert_eq!(score_skill("python", job_lower), 0);
        // all three related keywords tie with an exact match
        assert_eq!(score_skill("Python", "scripting, automation and programming"), 3);
    }

    #[test]
    fn test_ties_broken_alphabetically() {
        let skills = catalog(&[("b", &["Zeek", "Bash"]), ("a", &["Nmap"])]);
        let job = JobDescription::new("Unrelated posting");
        let names = reorder_skills_by_job(&skills, &job, 10);
        assert_eq!(names, vec!["Bash", "Nmap", "Zeek"]);
    }

    #[test]
    fn test_cap_and_duplicates() {
        let skills = catalog(&[("tools", &["Splunk", "Splunk", "Nmap"]), ("lang", &["Python"])]);
        let job = JobDescription::new("splunk");
        let ranked = rank_skills(&skills, &job, 2);
        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|s| s.skill == "Splunk"));
    }

    #[test]
    fn test_sorted_and_exact_never_below_weaker_related() {
        let skills = catalog(&[
            ("tools", &["Splunk", "Wireshark", "Nessus", "Volatility"]),
            ("skills", &["Threat Hunting", "Incident Response"]),
        ]);
        let job = JobDescription::new("Use Volatility for memory forensics; proactive threat detection and network traffic review");
        let ranked = rank_skills(&skills, &job, DEFAULT_MAX_SKILLS);

        for pair in ranked.windows(2) {
            assert!(
                pair[0].score > pair[1].score
                    || (pair[0].score == pair[1].score && pair[0].skill <= pair[1].skill)
            );
        }
        assert_eq!(ranked[0].skill, "Volatility");
        let threat = ranked.iter().position(|s| s.skill == "Threat Hunting").unwrap();
        let volatility = ranked.iter().position(|s| s.skill == "Volatility").unwrap();
        assert!(volatility < threat);
    }

    #[test]
    fn test_flatten_without_job() {
        let skills = catalog(&[("a", &["One", "Two"]), ("b", &["Three"])]);
        assert_eq!(flatten_skills(&skills, 2), vec!["One", "Two"]);
    }
}
