//! Company details inferred from a job posting

use crate::processing::lexical::{self, KeywordGroup};
use crate::processing::text_processor::JobDescription;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_COMPANY_NAME: &str = "the company";
pub const DEFAULT_LOCATION: &str = "remote";
pub const DEFAULT_COMPANY_VALUE: &str = "excellence";

static COMPANY_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i:join|company|we are|we're)\s+([A-Z][A-Za-z\s&]+?)(?:\.|,|\s+(?:at|as|to|is)\b)").unwrap()
});

static CITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(New York|San Francisco|London|Toronto|Seattle|Austin)").unwrap());

static VALUE_LEAD_INS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"we value\s+([^.]+)",
        r"our values?\s+include\s+([^.]+)",
        r"committed to\s+([^.]+)",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompanySize {
    Startup,
    MidSize,
    Enterprise,
}

impl CompanySize {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompanySize::Startup => "startup",
            CompanySize::MidSize => "mid-size",
            CompanySize::Enterprise => "enterprise",
        }
    }
}

impl fmt::Display for CompanySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Industry {
    Security,
    Fintech,
    Healthcare,
    Cloud,
    Enterprise,
    Technology,
}

impl Industry {
    pub fn as_str(&self) -> &'static str {
        match self {
            Industry::Security => "security",
            Industry::Fintech => "fintech",
            Industry::Healthcare => "healthcare",
            Industry::Cloud => "cloud",
            Industry::Enterprise => "enterprise",
            Industry::Technology => "technology",
        }
    }
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueTag {
    Innovation,
    Security,
    Efficiency,
    Teamwork,
    Growth,
    Quality,
}

impl ValueTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueTag::Innovation => "innovation",
            ValueTag::Security => "security",
            ValueTag::Efficiency => "efficiency",
            ValueTag::Teamwork => "teamwork",
            ValueTag::Growth => "growth",
            ValueTag::Quality => "quality",
        }
    }
}

impl fmt::Display for ValueTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static SIZE_GROUPS: Lazy<Vec<(CompanySize, KeywordGroup)>> = Lazy::new(|| {
    vec![
        (CompanySize::Startup, KeywordGroup::new(&["startup", "early-stage", "<50 employees"])),
        (CompanySize::Enterprise, KeywordGroup::new(&["enterprise", "fortune 500", "5000+"])),
        (CompanySize::MidSize, KeywordGroup::new(&["mid-size", "scale-up", "100-500"])),
    ]
});

// Checked in priority order; first hit wins
static INDUSTRY_GROUPS: Lazy<Vec<(Industry, KeywordGroup)>> = Lazy::new(|| {
    vec![
        (Industry::Security, KeywordGroup::new(&["security", "cybersecurity", "infosec"])),
        (Industry::Fintech, KeywordGroup::new(&["financial", "banking", "payments"])),
        (Industry::Healthcare, KeywordGroup::new(&["healthcare", "medical", "pharma"])),
        (Industry::Cloud, KeywordGroup::new(&["cloud", "aws", "azure", "gcp"])),
        (Industry::Enterprise, KeywordGroup::new(&["enterprise", "b2b", "saas"])),
    ]
});

static VALUE_GROUPS: Lazy<Vec<(ValueTag, KeywordGroup)>> = Lazy::new(|| {
    vec![
        (
            ValueTag::Innovation,
            KeywordGroup::new(&["cutting-edge", "advanced", "emerging", "next-generation", "forward-thinking"]),
        ),
        (
            ValueTag::Security,
            KeywordGroup::new(&["protecting", "safeguarding", "defending", "securing", "resilience"]),
        ),
        (
            ValueTag::Efficiency,
            KeywordGroup::new(&["streamlining", "optimizing", "automating", "improving", "accelerating"]),
        ),
        (
            ValueTag::Teamwork,
            KeywordGroup::new(&["collaborating", "partnering", "coordinating", "supporting", "enabling"]),
        ),
        (
            ValueTag::Growth,
            KeywordGroup::new(&["scaling", "expanding", "developing", "strengthening", "building"]),
        ),
        (
            ValueTag::Quality,
            KeywordGroup::new(&["excellence", "precision", "reliability", "standards"]),
        ),
    ]
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub company_name: String,
    pub company_size: CompanySize,
    pub industry: Industry,
    pub location: String,
    /// Declared values, first-detected first, without duplicates
    pub values: Vec<ValueTag>,
}

impl Default for CompanyInfo {
    fn default() -> Self {
        Self {
            company_name: DEFAULT_COMPANY_NAME.to_string(),
            company_size: CompanySize::MidSize,
            industry: Industry::Technology,
            location: DEFAULT_LOCATION.to_string(),
            values: Vec::new(),
        }
    }
}

impl CompanyInfo {
    /// Value the letter leans on; `excellence` when none was declared
    pub fn primary_value(&self) -> &str {
        self.values
            .first()
            .map(|value| value.as_str())
            .unwrap_or(DEFAULT_COMPANY_VALUE)
    }

    pub fn company_benefit(&self) -> String {
        format!("your {} mission", self.industry)
    }
}

/// Infer company details with fixed keyword rules; anything not found keeps its default
pub fn extract_company_info(job: &JobDescription) -> CompanyInfo {
    let raw = job.raw();
    let job_lower = job.lowered();
    let mut info = CompanyInfo::default();

    if let Some(name) = COMPANY_NAME_RE
        .captures(raw)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().trim())
        .filter(|name| !name.is_empty())
    {
        info.company_name = name.to_string();
    }

    if let Some((size, _)) = SIZE_GROUPS.iter().find(|(_, group)| group.is_match(job_lower)) {
        info.company_size = *size;
    }

    if let Some((industry, _)) = INDUSTRY_GROUPS.iter().find(|(_, group)| group.is_match(job_lower)) {
        info.industry = *industry;
    }

    if lexical::contains(job_lower, "remote") {
        info.location = DEFAULT_LOCATION.to_string();
    } else if let Some(city) = CITY_RE.captures(raw).and_then(|cap| cap.get(1)) {
        info.location = city.as_str().to_string();
    }

    for lead_in in VALUE_LEAD_INS.iter() {
        let Some(values_text) = lead_in.captures(job_lower).and_then(|cap| cap.get(1)) else {
            continue;
        };
        for (tag, group) in VALUE_GROUPS.iter() {
            if group.is_match(values_text.as_str()) && !info.values.contains(tag) {
                info.values.push(*tag);
            }
        }
    }

    debug!(
        "Company info: name='{}', size={}, industry={}, location={}, values=[{}]",
        info.company_name,
        info.company_size,
        info.industry,
        info.location,
        info.values.iter().map(|v| v.as_str()).collect::<Vec<_>>().join(", ")
    );

    info
}
