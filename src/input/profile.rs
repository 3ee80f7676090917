//! Master profile and per-role configuration records

use crate::error::Result;
use crate::letter::achievements::Achievement;
use crate::letter::templates::LetterStyle;
use crate::processing::keywords::Domain;
use crate::processing::metrics::MetricsRecord;
use crate::processing::skills::SkillCatalog;
use crate::processing::summary::SummaryBank;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Role name used for output files when no role is given
pub const GENERAL_ROLE_NAME: &str = "General";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileLink {
    pub network: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Basics {
    pub name: String,
    pub label: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub url: String,
    pub profiles: Vec<ProfileLink>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub company: String,
    pub position: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub summary: String,
    /// Raw duties, rephrased into impact bullets per role
    pub responsibilities: Vec<String>,
    /// Bullets kept verbatim
    pub highlights: Vec<String>,
    pub metrics: MetricsRecord,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub url: String,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub institution: String,
    pub area: String,
    pub study_type: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub date: String,
}

/// Everything known about the candidate; tailoring only ever reads from it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MasterProfile {
    pub basics: Basics,
    pub summaries: SummaryBank,
    pub skills: SkillCatalog,
    pub experience: Vec<Experience>,
    /// Projects grouped by category (`cyber`, `web`, `personal`, ...)
    pub projects: BTreeMap<String, Vec<Project>>,
    pub achievements: Vec<Achievement>,
    pub certifications: Vec<Certification>,
    pub education: Vec<Education>,
    pub years_experience: u32,
}

impl MasterProfile {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// All projects across categories, categories in key order
    pub fn all_projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.values().flatten()
    }

    pub fn find_project(&self, id: &str) -> Option<&Project> {
        self.all_projects().find(|project| project.id == id)
    }
}

/// Per-role tailoring instructions, one JSON file per target role
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleConfig {
    pub role_title: Option<String>,
    pub summary_type: Option<String>,
    pub project_ids: Option<Vec<String>>,
    /// Keyword dictionary to extract with
    pub domain: Option<String>,
    pub company_name: Option<String>,
    pub job_description: Option<String>,
    pub job_description_path: Option<PathBuf>,
    pub requirements: Vec<String>,
    pub primary_skill: Option<String>,
    pub years_experience: Option<u32>,
    /// Free-text domain quoted in the cover letter
    pub letter_domain: Option<String>,
    pub specialization: Option<String>,
    pub key_responsibility: Option<String>,
    pub style: Option<String>,
}

impl RoleConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let role: RoleConfig = serde_json::from_str(json)?;
        role.validate()?;
        Ok(role)
    }

    /// Reject unknown domain and style tags up front
    pub fn validate(&self) -> Result<()> {
        self.domain_tag()?;
        self.letter_style()?;
        Ok(())
    }

    pub fn domain_tag(&self) -> Result<Option<Domain>> {
        self.domain.as_deref().map(str::parse).transpose()
    }

    pub fn letter_style(&self) -> Result<Option<LetterStyle>> {
        self.style.as_deref().map(str::parse).transpose()
    }

    /// Name used in output file names, spaces replaced with underscores
    pub fn role_name(&self) -> String {
        role_file_stem(self.role_title.as_deref())
    }
}

pub fn role_file_stem(role_title: Option<&str>) -> String {
    role_title
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .unwrap_or(GENERAL_ROLE_NAME)
        .replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TailorError;

    const PROFILE: &str = r#"{
        "basics": {"name": "Violet Figueroa", "label": "Security Analyst"},
        "summaries": {"general": "Security analyst.", "appsec": "AppSec engineer."},
        "skills": {"tools": ["Splunk", "Python"]},
        "projects": {
            "cyber": [{"id": "honeypot", "name": "Honeypot"}, {"id": "siem-lab", "name": "SIEM Lab"}],
            "web": [{"id": "portfolio", "name": "Portfolio"}]
        },
        "achievements": [{"description": "Led incident response for 50+ incidents", "metrics": {"incidents": 50}}],
        "years_experience": 3
    }"#;

    #[test]
    fn test_profile_parses_with_defaults() {
        let profile = MasterProfile::from_json(PROFILE).unwrap();
        assert_eq!(profile.basics.name, "Violet Figueroa");
        assert_eq!(profile.basics.email, "");
        assert_eq!(profile.summaries.len(), 2);
        assert_eq!(profile.all_projects().count(), 3);
        assert_eq!(profile.find_project("portfolio").map(|p| p.name.as_str()), Some("Portfolio"));
        assert!(profile.find_project("missing").is_none());
        assert!(profile.experience.is_empty());
        assert_eq!(profile.years_experience, 3);
    }

    #[test]
    fn test_role_config_parses() {
        let role = RoleConfig::from_json(
            r#"{"role_title": "SOC Analyst II", "summary_type": "soc", "domain": "soc_analyst", "style": "achievement"}"#,
        )
        .unwrap();
        assert_eq!(role.role_name(), "SOC_Analyst_II");
        assert_eq!(role.domain_tag().unwrap(), Some(Domain::SocAnalyst));
        assert_eq!(role.letter_style().unwrap(), Some(LetterStyle::Achievement));
        assert!(role.project_ids.is_none());
    }

    #[test]
    fn test_role_config_rejects_unknown_tags() {
        let err = RoleConfig::from_json(r#"{"domain": "soc_analist"}"#).unwrap_err();
        assert!(matches!(err, TailorError::UnknownVariant { .. }));

        let err = RoleConfig::from_json(r#"{"style": "casual"}"#).unwrap_err();
        assert!(err.to_string().contains("casual"));
    }

    #[test]
    fn test_general_role_name() {
        assert_eq!(RoleConfig::default().role_name(), "General");
        assert_eq!(role_file_stem(Some("  ")), "General");
    }
}
