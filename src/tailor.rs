//! Resume and cover letter tailoring
//!
//! [`TailoringEngine`] turns a master profile, a role configuration and an
//! optional job posting into the records the renderer consumes. It is pure:
//! all file access lives in [`Generator`], which resolves inputs, writes the
//! rendered documents and hands them to the configured PDF converter.

use crate::config::{Config, DocumentFormat, TailoringConfig};
use crate::error::Result;
use crate::input::manager::InputManager;
use crate::input::profile::{Basics, Certification, Education, MasterProfile, Project, RoleConfig};
use crate::letter::company::{extract_company_info, CompanyInfo};
use crate::letter::composer::{generate_cover_letter, resolved_company_name, LetterRequest, LETTER_DATE_FORMAT};
use crate::letter::templates::LetterStyle;
use crate::letter::CoverLetterSections;
use crate::output::converter::{Converter, DocumentConverter};
use crate::output::render::{
    cover_letter_file_name, render_cover_letter_markdown, render_resume_markdown, resume_file_name, to_format,
    write_document,
};
use crate::processing::impact::{generate_impact_variants, ImpactRequest};
use crate::processing::keywords::{extract_job_keywords, generate_resume_headline, Domain, KeywordSet};
use crate::processing::skills::{flatten_skills, rank_skills, ScoredSkill};
use crate::processing::summary::{select_best_summary, SummarySelection, GENERAL_SUMMARY_KEY};
use crate::processing::text_processor::{validate_keyword_density, DensityReport, JobDescription};
use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Primary skill quoted in letters when the profile lists none
const FALLBACK_PRIMARY_SKILL: &str = "security operations";

/// How the candidate's background is described for a given summary type
pub fn background_context(summary_type: &str) -> &'static str {
    match summary_type {
        "appsec" => "full-stack development and application security",
        "healthcare" => "healthcare compliance and secure system administration",
        _ => "incident response and vulnerability management",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TailoredExperience {
    pub company: String,
    pub position: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub bullets: Vec<String>,
}

/// Resume content selected for one role
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TailoredResume {
    pub role_title: Option<String>,
    pub basics: Basics,
    pub headline: String,
    pub summary_key: String,
    pub summary: String,
    /// Present only when the summary was picked by scoring
    pub summary_confidence: Option<f32>,
    pub skills: Vec<String>,
    pub experience: Vec<TailoredExperience>,
    pub projects: Vec<Project>,
    pub education: Vec<Education>,
    pub certifications: Vec<Certification>,
    pub keywords: KeywordSet,
    pub density: Option<DensityReport>,
}

impl TailoredResume {
    /// Plain text of the generated content, for density checks
    fn body_text(&self) -> String {
        let mut parts = vec![self.headline.clone(), self.summary.clone(), self.skills.join(" ")];
        for job in &self.experience {
            parts.extend(job.bullets.iter().cloned());
        }
        parts.join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TailoredLetter {
    pub role_title: Option<String>,
    pub job_title: String,
    pub company_name: String,
    pub date: NaiveDate,
    pub sections: CoverLetterSections,
    pub basics: Basics,
}

impl TailoredLetter {
    pub fn date_line(&self) -> String {
        self.date.format(LETTER_DATE_FORMAT).to_string()
    }
}

/// What the engine makes of a posting, for the `analyze` command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobAnalysis {
    pub domain: Option<Domain>,
    pub word_count: usize,
    pub keywords: KeywordSet,
    pub ranked_skills: Vec<ScoredSkill>,
    pub summary: Option<SummarySelection>,
    pub company: CompanyInfo,
}

pub struct TailoringEngine {
    config: TailoringConfig,
}

impl TailoringEngine {
    pub fn new(config: TailoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TailoringConfig {
        &self.config
    }

    /// Select and rephrase profile content for one role
    pub fn tailor(
        &self,
        profile: &MasterProfile,
        role: &RoleConfig,
        job: Option<&JobDescription>,
    ) -> Result<TailoredResume> {
        let job = job.filter(|job| !job.is_empty());
        let domain = role.domain_tag()?;

        let mut basics = profile.basics.clone();
        if let Some(title) = role.role_title.as_deref() {
            basics.label = title.to_string();
        }

        let (summary_key, summary, summary_confidence) = self.select_summary(profile, role, job)?;
        let skills = self.select_skills(profile, job);
        let projects = self.select_projects(profile, role);
        let keywords = job
            .map(|job| extract_job_keywords(job, domain))
            .unwrap_or_default();

        let experience = profile
            .experience
            .iter()
            .map(|entry| {
                let mut bullets: Vec<String> = entry
                    .responsibilities
                    .iter()
                    .map(|duty| {
                        let mut request = ImpactRequest::new(duty, &entry.metrics);
                        if let Some(job) = job {
                            request = request.with_job(job);
                        }
                        generate_impact_variants(&request).recommended_bullet().to_string()
                    })
                    .collect();
                bullets.extend(entry.highlights.iter().cloned());

                TailoredExperience {
                    company: entry.company.clone(),
                    position: entry.position.clone(),
                    location: entry.location.clone(),
                    start_date: entry.start_date.clone(),
                    end_date: entry.end_date.clone(),
                    bullets,
                }
            })
            .collect();

        let headline = generate_resume_headline(&basics.label, &skills, role.specialization.as_deref());

        let mut resume = TailoredResume {
            role_title: role.role_title.clone(),
            basics,
            headline,
            summary_key,
            summary,
            summary_confidence,
            skills,
            experience,
            projects,
            education: profile.education.clone(),
            certifications: profile.certifications.clone(),
            keywords,
            density: None,
        };

        if !resume.keywords.is_empty() {
            let report = validate_keyword_density(
                &resume.body_text(),
                &resume.keywords.all_terms(),
                self.config.max_keyword_density,
            );
            if !report.is_valid {
                warn!(
                    "Keyword density {:.1}% exceeds {:.1}% for {}",
                    report.density * 100.0,
                    self.config.max_keyword_density * 100.0,
                    role.role_name()
                );
            }
            resume.density = Some(report);
        }

        info!(
            "Tailored resume for {}: summary '{}', {} skills, {} projects",
            role.role_name(),
            resume.summary_key,
            resume.skills.len(),
            resume.projects.len()
        );

        Ok(resume)
    }

    /// Explicit summary type, else scoring against the posting, else `general`
    fn select_summary(
        &self,
        profile: &MasterProfile,
        role: &RoleConfig,
        job: Option<&JobDescription>,
    ) -> Result<(String, String, Option<f32>)> {
        let bank = &profile.summaries;

        if let Some(key) = role.summary_type.as_deref() {
            if let Some(text) = bank.get(key) {
                return Ok((key.to_string(), text.clone(), None));
            }
            warn!("Summary type '{}' not in profile, choosing automatically", key);
        }

        if job.is_none() {
            if let Some(text) = bank.get(GENERAL_SUMMARY_KEY) {
                return Ok((GENERAL_SUMMARY_KEY.to_string(), text.clone(), None));
            }
        }

        let empty = JobDescription::empty();
        let selection = select_best_summary(bank, job.unwrap_or(&empty))?;
        Ok((selection.key, selection.text, Some(selection.confidence)))
    }

    fn select_skills(&self, profile: &MasterProfile, job: Option<&JobDescription>) -> Vec<String> {
        match job {
            Some(job) => rank_skills(&profile.skills, job, self.config.max_skills)
                .into_iter()
                .map(|scored| scored.skill)
                .collect(),
            None => flatten_skills(&profile.skills, self.config.max_skills),
        }
    }

    /// Projects named by the role in its order, else the default category's first few
    fn select_projects(&self, profile: &MasterProfile, role: &RoleConfig) -> Vec<Project> {
        match &role.project_ids {
            Some(ids) => ids
                .iter()
                .filter_map(|id| {
                    let found = profile.find_project(id);
                    if found.is_none() {
                        warn!("Project '{}' not found in profile", id);
                    }
                    found.cloned()
                })
                .collect(),
            None => profile
                .projects
                .get(&self.config.default_project_category)
                .map(|projects| {
                    projects
                        .iter()
                        .take(self.config.default_project_limit)
                        .cloned()
                        .collect()
                })
                .unwrap_or_default(),
        }
    }

    /// Compose a cover letter for a role.
    ///
    /// `style` overrides the role's own style; without either the letter is
    /// written in the professional style.
    pub fn cover_letter(
        &self,
        profile: &MasterProfile,
        role: &RoleConfig,
        job: Option<&JobDescription>,
        date: NaiveDate,
        style: Option<LetterStyle>,
    ) -> Result<TailoredLetter> {
        let job = job.filter(|job| !job.is_empty());
        let style = match style {
            Some(style) => style,
            None => role.letter_style()?.unwrap_or_default(),
        };
        let request = self.letter_request(profile, role, job, date)?;
        let sections = generate_cover_letter(&request, style);
        let company_name = resolved_company_name(&request, &sections.company_info).to_string();

        Ok(TailoredLetter {
            role_title: role.role_title.clone(),
            job_title: request.job_title,
            company_name,
            date,
            sections,
            basics: profile.basics.clone(),
        })
    }

    /// Letters in every variant style
    pub fn cover_letter_variants(
        &self,
        profile: &MasterProfile,
        role: &RoleConfig,
        job: Option<&JobDescription>,
        date: NaiveDate,
    ) -> Result<Vec<TailoredLetter>> {
        LetterStyle::VARIANTS
            .iter()
            .map(|style| self.cover_letter(profile, role, job, date, Some(*style)))
            .collect()
    }

    fn letter_request(
        &self,
        profile: &MasterProfile,
        role: &RoleConfig,
        job: Option<&JobDescription>,
        date: NaiveDate,
    ) -> Result<LetterRequest> {
        let keywords = match job {
            Some(job) => extract_job_keywords(job, role.domain_tag()?),
            None => KeywordSet::default(),
        };

        let job_title = role
            .role_title
            .clone()
            .filter(|title| !title.trim().is_empty())
            .unwrap_or_else(|| profile.basics.label.clone());

        let mut request = LetterRequest::new(profile.basics.name.clone(), job_title, date);
        request.company_name = role.company_name.clone().unwrap_or_default();
        request.years_experience = role
            .years_experience
            .or_else(|| keywords.years_required())
            .unwrap_or(profile.years_experience);
        request.primary_skill = role
            .primary_skill
            .clone()
            .or_else(|| self.select_skills(profile, job).into_iter().next())
            .unwrap_or_else(|| FALLBACK_PRIMARY_SKILL.to_string());
        request.domain = role.letter_domain.clone().unwrap_or_else(|| {
            let summary_type = role.summary_type.as_deref().unwrap_or(GENERAL_SUMMARY_KEY);
            background_context(summary_type).to_string()
        });
        request.requirements = if role.requirements.is_empty() {
            keywords.domain_terms()
        } else {
            role.requirements.clone()
        };
        request.achievements = profile.achievements.clone();
        if let Some(job) = job {
            request.job = job.clone();
        }
        if let Some(duty) = role.key_responsibility.as_deref() {
            request.key_responsibility = duty.to_string();
        }
        if !profile.basics.email.is_empty() {
            request.contact_info = profile.basics.email.clone();
        }
        request.proof_examples = self.config.proof_examples;

        debug!(
            "Letter request: {} years, primary skill '{}', {} requirements",
            request.years_experience,
            request.primary_skill,
            request.requirements.len()
        );
        Ok(request)
    }

    /// Keywords, ranked skills, best summary and company details for a posting
    pub fn analyze(
        &self,
        profile: Option<&MasterProfile>,
        job: &JobDescription,
        domain: Option<Domain>,
    ) -> Result<JobAnalysis> {
        let (ranked_skills, summary) = match profile {
            Some(profile) => {
                let summary = if profile.summaries.is_empty() {
                    None
                } else {
                    Some(select_best_summary(&profile.summaries, job)?)
                };
                (rank_skills(&profile.skills, job, self.config.max_skills), summary)
            }
            None => (Vec::new(), None),
        };

        Ok(JobAnalysis {
            domain,
            word_count: job.word_count(),
            keywords: extract_job_keywords(job, domain),
            ranked_skills,
            summary,
            company: extract_company_info(job),
        })
    }
}

/// Options for one generation run
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    pub format: DocumentFormat,
    pub convert: bool,
    pub date: NaiveDate,
    pub letter_style: Option<LetterStyle>,
    /// Replaces any job description named by the role
    pub job_override: Option<PathBuf>,
}

/// Files written for one role
#[derive(Debug, Clone, Default, Serialize)]
pub struct GeneratedFiles {
    pub role_name: String,
    pub resume: PathBuf,
    pub cover_letter: Option<PathBuf>,
    pub pdfs: Vec<PathBuf>,
    pub warnings: Vec<String>,
}

/// File-backed generation: loads inputs, renders, writes and converts
pub struct Generator {
    config: Config,
    engine: TailoringEngine,
    inputs: InputManager,
    converter: Converter,
}

impl Generator {
    pub fn new(config: Config) -> Self {
        let engine = TailoringEngine::new(config.tailoring.clone());
        let converter = Converter::from_config(&config.conversion);
        Self {
            config,
            engine,
            inputs: InputManager::new(),
            converter,
        }
    }

    pub fn engine(&self) -> &TailoringEngine {
        &self.engine
    }

    pub fn inputs(&mut self) -> &mut InputManager {
        &mut self.inputs
    }

    pub async fn load_profile(&self) -> Result<MasterProfile> {
        let path = InputManager::locate_profile(&self.config.paths.private_dir, &self.config.paths.data_dir)?;
        self.inputs.load_profile(&path).await
    }

    pub async fn load_role(&self, path: &Path) -> Result<RoleConfig> {
        self.inputs.load_role_config(path).await
    }

    /// Job text for a role: explicit override, inline text, then a file the
    /// role points at (relative to the role file first)
    pub async fn resolve_job(
        &mut self,
        role: &RoleConfig,
        role_path: Option<&Path>,
        job_override: Option<&Path>,
    ) -> Result<Option<JobDescription>> {
        if let Some(path) = job_override {
            return self.inputs.load_job(path).await.map(Some);
        }
        if let Some(text) = role.job_description.as_deref() {
            return Ok(Some(JobDescription::new(text)));
        }
        if let Some(path) = role.job_description_path.as_deref() {
            let beside_role = role_path
                .and_then(Path::parent)
                .map(|dir| dir.join(path))
                .filter(|candidate| path.is_relative() && candidate.exists());
            let resolved = beside_role.unwrap_or_else(|| path.to_path_buf());
            return self.inputs.load_job(&resolved).await.map(Some);
        }
        Ok(None)
    }

    /// Generate the resume, and for a named role the cover letter
    pub async fn generate(
        &mut self,
        profile: &MasterProfile,
        role_path: Option<&Path>,
        options: &GenerationOptions,
    ) -> Result<GeneratedFiles> {
        let role = match role_path {
            Some(path) => self.load_role(path).await?,
            None => RoleConfig::default(),
        };
        let job = self
            .resolve_job(&role, role_path, options.job_override.as_deref())
            .await?;
        let output_dir = self.config.paths.output_dir.clone();

        let mut files = GeneratedFiles {
            role_name: role.role_name(),
            ..Default::default()
        };

        let resume = self.engine.tailor(profile, &role, job.as_ref())?;
        if let Some(density) = resume.density.filter(|report| !report.is_valid) {
            files.warnings.push(format!(
                "Keyword density {:.1}% is above the {:.1}% ceiling",
                density.density * 100.0,
                self.config.tailoring.max_keyword_density * 100.0
            ));
        }
        let markdown = render_resume_markdown(&resume)?;
        let content = to_format(&markdown, &format!("Resume - {}", resume.basics.name), options.format)?;
        let file_name = resume_file_name(role.role_title.as_deref(), options.format);
        files.resume = write_document(&output_dir, &file_name, &content).await?;
        self.convert(&files.resume.clone(), options, &mut files).await;

        if role_path.is_some() {
            let letter = self
                .engine
                .cover_letter(profile, &role, job.as_ref(), options.date, options.letter_style)?;
            let markdown = render_cover_letter_markdown(&letter)?;
            let content = to_format(&markdown, &format!("Cover Letter - {}", letter.job_title), options.format)?;
            let file_name = cover_letter_file_name(role.role_title.as_deref(), options.format);
            let path = write_document(&output_dir, &file_name, &content).await?;
            self.convert(&path, options, &mut files).await;
            files.cover_letter = Some(path);
        }

        Ok(files)
    }

    /// General resume first, then every role file in sorted order
    pub async fn generate_all(
        &mut self,
        profile: &MasterProfile,
        options: &GenerationOptions,
    ) -> Result<Vec<GeneratedFiles>> {
        let roles_dir = self.config.paths.roles_dir.clone();
        let role_files = if roles_dir.is_dir() {
            self.inputs.list_role_files(&roles_dir).await?
        } else {
            warn!("Roles directory {} not found; generating the general resume only", roles_dir.display());
            Vec::new()
        };

        let progress = ProgressBar::new(role_files.len() as u64 + 1);
        progress.set_style(
            ProgressStyle::with_template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
        );

        let mut results = Vec::with_capacity(role_files.len() + 1);

        progress.set_message("General");
        results.push(self.generate(profile, None, options).await?);
        progress.inc(1);

        for path in &role_files {
            let label = path
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_default();
            progress.set_message(label);
            results.push(self.generate(profile, Some(path), options).await?);
            progress.inc(1);
        }

        progress.finish_with_message(format!("{} document sets generated", results.len()));
        Ok(results)
    }

    /// Conversion failures are recorded as warnings and never abort generation
    async fn convert(&self, input: &Path, options: &GenerationOptions, files: &mut GeneratedFiles) {
        if !options.convert {
            return;
        }
        match self.converter.convert(input).await {
            Ok(Some(pdf)) => files.pdfs.push(pdf),
            Ok(None) => {}
            Err(e) => {
                warn!("{} conversion failed: {}", self.converter.name(), e);
                files.warnings.push(e.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::profile::Experience;
    use crate::letter::achievements::Achievement;
    use crate::processing::metrics::MetricValue;
    use crate::TailorError;

    fn project(id: &str) -> Project {
        Project {
            id: id.to_string(),
            name: id.to_uppercase(),
            ..Default::default()
        }
    }

    fn sample_profile() -> MasterProfile {
        let mut profile = MasterProfile::default();
        profile.basics.name = "Violet Figueroa".to_string();
        profile.basics.label = "Security Analyst".to_string();
        profile.years_experience = 3;
        for (key, text) in [
            ("general", "Security analyst focused on monitoring and risk."),
            ("appsec", "Engineer securing web applications."),
            ("soc", "SOC analyst with SIEM and threat detection depth."),
        ] {
            profile.summaries.insert(key.to_string(), text.to_string());
        }
        profile.skills.insert(
            "tools".to_string(),
            vec!["Python".to_string(), "Splunk".to_string(), "Wireshark".to_string()],
        );
        profile.projects.insert(
            "cyber".to_string(),
            (1..=7).map(|i| project(&format!("cyber{}", i))).collect(),
        );
        profile.projects.insert("web".to_string(), vec![project("portfolio")]);

        let mut experience = Experience {
            company: "SecureOps".to_string(),
            position: "Analyst".to_string(),
            responsibilities: vec!["monitored SIEM alerts".to_string()],
            highlights: vec!["Built a phishing triage runbook".to_string()],
            ..Default::default()
        };
        experience
            .metrics
            .insert("incidents_reduced".to_string(), MetricValue::Float(0.4));
        profile.experience.push(experience);
        profile.achievements = vec![
            Achievement::new("Led incident response for 50+ incidents"),
            Achievement::new("Tuned Splunk correlation searches"),
        ];
        profile
    }

    fn engine() -> TailoringEngine {
        TailoringEngine::new(TailoringConfig::default())
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    #[test]
    fn test_background_context() {
        assert_eq!(background_context("appsec"), "full-stack development and application security");
        assert_eq!(
            background_context("healthcare"),
            "healthcare compliance and secure system administration"
        );
        assert_eq!(background_context("soc"), "incident response and vulnerability management");
    }

    #[test]
    fn test_general_resume_defaults() {
        let resume = engine().tailor(&sample_profile(), &RoleConfig::default(), None).unwrap();
        assert_eq!(resume.summary_key, "general");
        assert!(resume.summary_confidence.is_none());
        assert_eq!(resume.basics.label, "Security Analyst");
        assert_eq!(resume.skills, vec!["Python", "Splunk", "Wireshark"]);
        assert_eq!(resume.projects.len(), 5);
        assert_eq!(resume.projects[0].id, "cyber1");
        assert!(resume.keywords.is_empty());
        assert!(resume.density.is_none());
        assert_eq!(resume.headline, "Security Analyst | Python & Splunk");
    }

    #[test]
    fn test_role_overrides() {
        let role = RoleConfig {
            role_title: Some("AppSec Engineer".to_string()),
            summary_type: Some("appsec".to_string()),
            project_ids: Some(vec!["portfolio".to_string(), "missing".to_string(), "cyber3".to_string()]),
            specialization: Some("Secure SDLC".to_string()),
            ..Default::default()
        };
        let resume = engine().tailor(&sample_profile(), &role, None).unwrap();
        assert_eq!(resume.basics.label, "AppSec Engineer");
        assert_eq!(resume.summary_key, "appsec");
        let ids: Vec<_> = resume.projects.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["portfolio", "cyber3"]);
        assert!(resume.headline.ends_with("| Secure SDLC"));
    }

    #[test]
    fn test_job_drives_summary_skills_and_bullets() {
        let job = JobDescription::new("SOC analyst to triage SIEM alerts in Splunk and lead incident response");
        let role = RoleConfig {
            domain: Some("soc_analyst".to_string()),
            summary_type: Some("unknown".to_string()),
            ..Default::default()
        };
        let resume = engine().tailor(&sample_profile(), &role, Some(&job)).unwrap();

        assert_eq!(resume.summary_key, "soc");
        assert!(resume.summary_confidence.unwrap() > 0.0);
        assert_eq!(resume.skills[0], "Splunk");
        assert!(!resume.keywords.is_empty());
        assert!(resume.density.is_some());

        let bullets = &resume.experience[0].bullets;
        assert_eq!(bullets.len(), 2);
        assert!(bullets[0].contains("40%"));
        assert_eq!(bullets[1], "Built a phishing triage runbook");
    }

    #[test]
    fn test_empty_summary_bank_fails() {
        let mut profile = sample_profile();
        profile.summaries.clear();
        let result = engine().tailor(&profile, &RoleConfig::default(), None);
        assert!(matches!(result, Err(TailorError::NoCandidates(_))));
    }

    #[test]
    fn test_cover_letter_uses_role_and_job() {
        let job = JobDescription::new("Join SecureOps as a SOC Analyst. 5+ years of incident response required.");
        let role = RoleConfig {
            role_title: Some("SOC Analyst".to_string()),
            domain: Some("incident_response".to_string()),
            requirements: vec!["incident response".to_string()],
            ..Default::default()
        };
        let letter = engine()
            .cover_letter(&sample_profile(), &role, Some(&job), date(), None)
            .unwrap();

        assert_eq!(letter.company_name, "SecureOps");
        assert_eq!(letter.sections.style, LetterStyle::Professional);
        // years come from the posting when the role does not set them
        assert!(letter.sections.opening.contains("5+ years"));
        assert!(letter.sections.opening.contains("incident response and vulnerability management"));
        assert_eq!(letter.sections.matches.len(), 1);
        assert_eq!(letter.date_line(), "March 05, 2024");
    }

    #[test]
    fn test_blank_role_company_falls_back_to_posting() {
        let job = JobDescription::new("Join SecureOps as a SOC Analyst. 5+ years of incident response required.");
        let role = RoleConfig {
            role_title: Some("SOC Analyst".to_string()),
            company_name: Some("   ".to_string()),
            ..Default::default()
        };
        let letter = engine()
            .cover_letter(&sample_profile(), &role, Some(&job), date(), None)
            .unwrap();

        assert_eq!(letter.company_name, "SecureOps");
        assert!(letter.sections.opening.contains("SecureOps"));
    }

    #[test]
    fn test_cover_letter_style_precedence() {
        let role = RoleConfig {
            role_title: Some("SOC Analyst".to_string()),
            style: Some("cultural".to_string()),
            years_experience: Some(4),
            ..Default::default()
        };
        let profile = sample_profile();
        let letter = engine().cover_letter(&profile, &role, None, date(), None).unwrap();
        assert_eq!(letter.sections.style, LetterStyle::Cultural);

        let letter = engine()
            .cover_letter(&profile, &role, None, date(), Some(LetterStyle::Enthusiastic))
            .unwrap();
        assert_eq!(letter.sections.style, LetterStyle::Enthusiastic);
        assert!(letter.sections.opening.contains("4+ years"));
        assert_eq!(letter.company_name, "the company");
    }

    #[test]
    fn test_cover_letter_variants_are_stable() {
        let profile = sample_profile();
        let role = RoleConfig {
            role_title: Some("SOC Analyst".to_string()),
            ..Default::default()
        };
        let first = engine().cover_letter_variants(&profile, &role, None, date()).unwrap();
        let second = engine().cover_letter_variants(&profile, &role, None, date()).unwrap();
        assert_eq!(first.len(), 3);
        assert_eq!(first, second);
    }

    #[test]
    fn test_analyze() {
        let job = JobDescription::new("We are SecureOps, a startup hunting threats with Splunk. CISSP preferred.");
        let analysis = engine()
            .analyze(Some(&sample_profile()), &job, Some(Domain::SocAnalyst))
            .unwrap();
        assert_eq!(analysis.company.company_name, "SecureOps");
        assert!(analysis.keywords.custom.contains(&"CISSP".to_string()));
        assert_eq!(analysis.ranked_skills[0].skill, "Splunk");
        assert!(analysis.summary.is_some());

        let bare = engine().analyze(None, &job, None).unwrap();
        assert!(bare.ranked_skills.is_empty());
        assert!(bare.summary.is_none());
    }
}
