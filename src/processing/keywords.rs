//! Domain keyword extraction from job descriptions

use crate::error::{Result, TailorError};
use crate::processing::lexical;
use crate::processing::text_processor::JobDescription;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

static YEARS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\+?\s+years?").unwrap());

/// Certifications recognised in any posting, regardless of domain
pub const CERTIFICATIONS: [&str; 6] = ["Security+", "CEH", "CISSP", "OSCP", "SANS", "CompTIA"];

/// Security specialisations with a curated keyword dictionary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    SocAnalyst,
    IncidentResponse,
    VulnerabilityManagement,
    Appsec,
    NetworkSecurity,
    CloudSecurity,
}

impl Domain {
    pub const ALL: [Domain; 6] = [
        Domain::SocAnalyst,
        Domain::IncidentResponse,
        Domain::VulnerabilityManagement,
        Domain::Appsec,
        Domain::NetworkSecurity,
        Domain::CloudSecurity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::SocAnalyst => "soc_analyst",
            Domain::IncidentResponse => "incident_response",
            Domain::VulnerabilityManagement => "vulnerability_management",
            Domain::Appsec => "appsec",
            Domain::NetworkSecurity => "network_security",
            Domain::CloudSecurity => "cloud_security",
        }
    }

    /// Parse a domain tag, treating unknown tags as "no domain"
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.parse() {
            Ok(domain) => Some(domain),
            Err(_) => {
                debug!("Ignoring unknown domain tag '{}'", tag);
                None
            }
        }
    }

    pub fn dictionary(&self) -> &'static DomainDictionary {
        match self {
            Domain::SocAnalyst => &SOC_ANALYST,
            Domain::IncidentResponse => &INCIDENT_RESPONSE,
            Domain::VulnerabilityManagement => &VULNERABILITY_MANAGEMENT,
            Domain::Appsec => &APPSEC,
            Domain::NetworkSecurity => &NETWORK_SECURITY,
            Domain::CloudSecurity => &CLOUD_SECURITY,
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = TailorError;

    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.trim().to_lowercase();
        Domain::ALL
            .iter()
            .copied()
            .find(|domain| domain.as_str() == lowered)
            .ok_or_else(|| {
                let known: Vec<&str> = Domain::ALL.iter().map(|d| d.as_str()).collect();
                TailorError::unknown_variant("domain", s, &known)
            })
    }
}

/// Keyword lists for one domain
#[derive(Debug)]
pub struct DomainDictionary {
    pub tools: &'static [&'static str],
    pub concepts: &'static [&'static str],
    pub frameworks: &'static [&'static str],
}

static SOC_ANALYST: DomainDictionary = DomainDictionary {
    tools: &["Splunk", "QRadar", "ArcSight", "Sumo Logic", "ELK Stack"],
    concepts: &["SIEM", "threat hunting", "log analysis", "incident response", "threat detection"],
    frameworks: &["MITRE ATT&CK", "NIST 800-53", "CIS Controls"],
};

static INCIDENT_RESPONSE: DomainDictionary = DomainDictionary {
    tools: &["Splunk", "Wireshark", "Volatility", "Autopsy", "Elastic"],
    concepts: &[
        "forensics",
        "incident response",
        "breach investigation",
        "root cause analysis",
        "timeline reconstruction",
    ],
    frameworks: &["NIST IR", "SANS IR", "MITRE ATT&CK"],
};

static VULNERABILITY_MANAGEMENT: DomainDictionary = DomainDictionary {
    tools: &["Nessus", "Qualys", "OpenVAS", "Rapid7", "Tenable"],
    concepts: &[
        "vulnerability assessment",
        "vulnerability management",
        "risk management",
        "patch management",
        "CVE analysis",
    ],
    frameworks: &["CVSS", "CVRF", "CIS"],
};

static APPSEC: DomainDictionary = DomainDictionary {
    tools: &["BurpSuite", "OWASP ZAP", "Checkmarx", "SonarQube"],
    concepts: &["secure code", "OWASP", "web security", "API security", "secure coding"],
    frameworks: &["OWASP Top 10", "CWE", "SANS Top 25"],
};

static NETWORK_SECURITY: DomainDictionary = DomainDictionary {
    tools: &["Palo Alto", "Cisco ASA", "Check Point", "Fortinet"],
    concepts: &["network security", "firewall", "IDS/IPS", "VPN", "network monitoring"],
    frameworks: &["NIST", "CIS", "ISO 27001"],
};

static CLOUD_SECURITY: DomainDictionary = DomainDictionary {
    tools: &["AWS Security", "Azure Security", "Google Cloud Security", "CloudTrail"],
    concepts: &["cloud security", "infrastructure security", "cloud compliance", "identity management"],
    frameworks: &["CIS Benchmarks", "Cloud Security Alliance", "ISO 27001"],
};

/// Keyword category in a [`KeywordSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordCategory {
    Tools,
    Concepts,
    Frameworks,
    Custom,
}

/// Keywords pulled from one job description, grouped by category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordSet {
    pub tools: Vec<String>,
    pub concepts: Vec<String>,
    pub frameworks: Vec<String>,
    pub custom: Vec<String>,
}

impl KeywordSet {
    pub fn get(&self, category: KeywordCategory) -> &[String] {
        match category {
            KeywordCategory::Tools => &self.tools,
            KeywordCategory::Concepts => &self.concepts,
            KeywordCategory::Frameworks => &self.frameworks,
            KeywordCategory::Custom => &self.custom,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty() && self.concepts.is_empty() && self.frameworks.is_empty() && self.custom.is_empty()
    }

    /// Domain keywords (tools, concepts, frameworks) in category order
    pub fn domain_terms(&self) -> Vec<String> {
        self.tools
            .iter()
            .chain(&self.concepts)
            .chain(&self.frameworks)
            .cloned()
            .collect()
    }

    /// Every extracted keyword, custom signals last
    pub fn all_terms(&self) -> Vec<String> {
        let mut terms = self.domain_terms();
        terms.extend(self.custom.iter().cloned());
        terms
    }

    /// Years of experience requested by the posting, if it stated any
    pub fn years_required(&self) -> Option<u32> {
        self.custom
            .iter()
            .find_map(|entry| entry.strip_suffix(" years"))
            .and_then(|years| years.parse().ok())
    }
}

/// Extract domain and generic keywords from a job description.
///
/// Domain keywords keep the dictionary's declaration order. The first
/// "N years" mention and every listed certification go to `custom`.
pub fn extract_job_keywords(job: &JobDescription, domain: Option<Domain>) -> KeywordSet {
    let job_lower = job.lowered();
    let mut extracted = KeywordSet::default();

    if let Some(domain) = domain {
        let dictionary = domain.dictionary();
        extracted.tools = present_in(job_lower, dictionary.tools);
        extracted.concepts = present_in(job_lower, dictionary.concepts);
        extracted.frameworks = present_in(job_lower, dictionary.frameworks);
    }

    if let Some(years) = YEARS_RE.captures_iter(job_lower).next().and_then(|cap| cap.get(1)) {
        extracted.custom.push(format!("{} years", years.as_str()));
    }

    extracted
        .custom
        .extend(present_in(job_lower, &CERTIFICATIONS));

    debug!(
        "Extracted {} domain keywords and {} custom signals (domain: {})",
        extracted.domain_terms().len(),
        extracted.custom.len(),
        domain.map(|d| d.as_str()).unwrap_or("none")
    );

    extracted
}

fn present_in(job_lower: &str, keywords: &[&str]) -> Vec<String> {
    keywords
        .iter()
        .filter(|keyword| lexical::contains(job_lower, &keyword.to_lowercase()))
        .map(|keyword| keyword.to_string())
        .collect()
}

/// Build an ATS-friendly headline: `Title | Skill1 & Skill2 | Specialization`
pub fn generate_resume_headline(job_title: &str, top_skills: &[String], specialization: Option<&str>) -> String {
    let skills = match top_skills {
        [] => "Security Professional".to_string(),
        [only] => only.clone(),
        [first, second, ..] => format!("{} & {}", first, second),
    };

    match specialization {
        Some(spec) if !spec.trim().is_empty() => format!("{} | {} | {}", job_title, skills, spec),
        _ => format!("{} | {}", job_title, skills),
    }
}
