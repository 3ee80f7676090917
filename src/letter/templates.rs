//! Cover letter paragraph templates and tone selection

use crate::error::{Result, TailorError};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{(\w+)\}").unwrap());

/// Substitute `{name}` placeholders in one pass; unknown placeholders are left
/// in place and substituted values are never expanded again
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures| {
            values
                .iter()
                .find(|(name, _)| *name == &caps[1])
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn parse_tag<T: Copy>(kind: &'static str, input: &str, all: &[T], name: fn(&T) -> &'static str) -> Result<T> {
    let lowered = input.trim().to_lowercase();
    all.iter()
        .copied()
        .find(|candidate| name(candidate) == lowered)
        .ok_or_else(|| {
            let known: Vec<&str> = all.iter().map(name).collect();
            TailorError::unknown_variant(kind, input, &known)
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpeningStyle {
    Enthusiastic,
    Direct,
    Achievement,
    Cultural,
}

impl OpeningStyle {
    pub const ALL: [OpeningStyle; 4] = [
        OpeningStyle::Enthusiastic,
        OpeningStyle::Direct,
        OpeningStyle::Achievement,
        OpeningStyle::Cultural,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OpeningStyle::Enthusiastic => "enthusiastic",
            OpeningStyle::Direct => "direct",
            OpeningStyle::Achievement => "achievement",
            OpeningStyle::Cultural => "cultural",
        }
    }

    /// Placeholders: job_title, company_name, years, primary_skill, domain,
    /// key_responsibility, achievement_count, company_benefit, company_value
    pub fn template(&self) -> &'static str {
        match self {
            OpeningStyle::Enthusiastic => {
                "I am excited to apply for the {job_title} position at {company_name}. With my {years}+ years of experience in {primary_skill} and proven track record in {domain}, I am confident I can make immediate contributions to your team."
            }
            OpeningStyle::Direct => {
                "As a {primary_skill} professional with {years}+ years of hands-on experience in {domain}, I am writing to express my strong interest in the {job_title} role at {company_name}."
            }
            OpeningStyle::Achievement => {
                "Your search for a {job_title} who can {key_responsibility} aligns perfectly with my background. I have successfully led {achievement_count}+ initiatives in {domain}, delivering measurable results that directly support {company_benefit}."
            }
            OpeningStyle::Cultural => {
                "I am drawn to {company_name}'s commitment to {company_value}, and I believe my expertise in {primary_skill} and passion for {domain} make me an ideal candidate for the {job_title} position."
            }
        }
    }
}

/// Body styles phrase each requirement/achievement pair differently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyStyle {
    Achievement,
    Collaboration,
    Technical,
    Impact,
}

impl BodyStyle {
    pub const ALL: [BodyStyle; 4] = [
        BodyStyle::Achievement,
        BodyStyle::Collaboration,
        BodyStyle::Technical,
        BodyStyle::Impact,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BodyStyle::Achievement => "achievement",
            BodyStyle::Collaboration => "collaboration",
            BodyStyle::Technical => "technical",
            BodyStyle::Impact => "impact",
        }
    }

    /// One paragraph per matched requirement.
    ///
    /// Placeholders: requirement, achievement, company_name, primary_skill, domain
    pub fn match_template(&self) -> &'static str {
        match self {
            BodyStyle::Achievement => {
                "My experience with {requirement} directly supports your needs. {achievement}. I am particularly interested in contributing to {company_name}'s goals in this area."
            }
            BodyStyle::Collaboration => {
                "Working alongside cross-functional partners on {requirement}: {achievement}. That collaborative approach is what I would bring to {company_name}'s team."
            }
            BodyStyle::Technical => {
                "Your emphasis on {requirement} maps directly to my hands-on work: {achievement}. My proficiency in {primary_skill} would let me contribute to {company_name} from day one."
            }
            BodyStyle::Impact => {
                "In {requirement}, my contributions have produced measurable results. {achievement}. I am excited to bring this track record in {domain} to {company_name}."
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClosingStyle {
    Enthusiastic,
    Professional,
    Action,
    Partnership,
}

impl ClosingStyle {
    pub const ALL: [ClosingStyle; 4] = [
        ClosingStyle::Enthusiastic,
        ClosingStyle::Professional,
        ClosingStyle::Action,
        ClosingStyle::Partnership,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClosingStyle::Enthusiastic => "enthusiastic",
            ClosingStyle::Professional => "professional",
            ClosingStyle::Action => "action",
            ClosingStyle::Partnership => "partnership",
        }
    }

    /// Placeholders: company_name, primary_skill, domain, company_value, contact_info
    pub fn template(&self) -> &'static str {
        match self {
            ClosingStyle::Enthusiastic => {
                "I am excited about the opportunity to contribute to {company_name}'s mission and would welcome the chance to discuss how my background in {primary_skill} can support your team's goals. Thank you for considering my application."
            }
            ClosingStyle::Professional => {
                "I appreciate your consideration and would be pleased to discuss how my experience in {domain} can benefit {company_name}. I look forward to the opportunity to speak with you."
            }
            ClosingStyle::Action => {
                "I am confident that my skills in {primary_skill} and commitment to {company_value} make me a strong fit for this role. I am available for an interview at your earliest convenience and can be reached at {contact_info}."
            }
            ClosingStyle::Partnership => {
                "I believe my background in {domain} positions me well to contribute meaningfully to {company_name}'s objectives. I look forward to discussing this exciting opportunity with you."
            }
        }
    }
}

/// Overall letter tone; picks one opening, body and closing style
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterStyle {
    Enthusiastic,
    Professional,
    Achievement,
    Cultural,
}

impl LetterStyle {
    pub const ALL: [LetterStyle; 4] = [
        LetterStyle::Enthusiastic,
        LetterStyle::Professional,
        LetterStyle::Achievement,
        LetterStyle::Cultural,
    ];

    /// Styles produced by the variant generator, in output order
    pub const VARIANTS: [LetterStyle; 3] = [
        LetterStyle::Enthusiastic,
        LetterStyle::Professional,
        LetterStyle::Achievement,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LetterStyle::Enthusiastic => "enthusiastic",
            LetterStyle::Professional => "professional",
            LetterStyle::Achievement => "achievement",
            LetterStyle::Cultural => "cultural",
        }
    }

    pub fn opening(&self) -> OpeningStyle {
        match self {
            LetterStyle::Enthusiastic => OpeningStyle::Enthusiastic,
            LetterStyle::Professional => OpeningStyle::Direct,
            LetterStyle::Achievement => OpeningStyle::Achievement,
            LetterStyle::Cultural => OpeningStyle::Cultural,
        }
    }

    pub fn body(&self) -> BodyStyle {
        match self {
            LetterStyle::Enthusiastic => BodyStyle::Achievement,
            LetterStyle::Professional => BodyStyle::Technical,
            LetterStyle::Achievement => BodyStyle::Impact,
            LetterStyle::Cultural => BodyStyle::Collaboration,
        }
    }

    pub fn closing(&self) -> ClosingStyle {
        match self {
            LetterStyle::Enthusiastic => ClosingStyle::Enthusiastic,
            LetterStyle::Professional => ClosingStyle::Professional,
            LetterStyle::Achievement => ClosingStyle::Action,
            LetterStyle::Cultural => ClosingStyle::Partnership,
        }
    }
}

impl Default for LetterStyle {
    fn default() -> Self {
        LetterStyle::Professional
    }
}

impl fmt::Display for OpeningStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for BodyStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ClosingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for LetterStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OpeningStyle {
    type Err = TailorError;

    fn from_str(s: &str) -> Result<Self> {
        parse_tag("opening style", s, &OpeningStyle::ALL, OpeningStyle::as_str)
    }
}

impl FromStr for BodyStyle {
    type Err = TailorError;

    fn from_str(s: &str) -> Result<Self> {
        parse_tag("body style", s, &BodyStyle::ALL, BodyStyle::as_str)
    }
}

impl FromStr for ClosingStyle {
    type Err = TailorError;

    fn from_str(s: &str) -> Result<Self> {
        parse_tag("closing style", s, &ClosingStyle::ALL, ClosingStyle::as_str)
    }
}

impl FromStr for LetterStyle {
    type Err = TailorError;

    fn from_str(s: &str) -> Result<Self> {
        parse_tag("letter style", s, &LetterStyle::ALL, LetterStyle::as_str)
    }
}
