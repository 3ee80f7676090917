//! Cover letter assembly
//!
//! A letter is three paragraphs rendered from the templates selected by a
//! [`LetterStyle`], wrapped in a fixed business-letter frame. Everything that
//! varies between runs (the date in particular) is carried on the request, so
//! the same request always produces the same text.

use crate::letter::achievements::{select_proof_examples, Achievement, RequirementMatch, DEFAULT_TOP_N};
use crate::letter::company::{extract_company_info, CompanyInfo};
use crate::letter::templates::{fill_template, BodyStyle, ClosingStyle, LetterStyle, OpeningStyle};
use crate::processing::text_processor::JobDescription;
use chrono::NaiveDate;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_KEY_RESPONSIBILITY: &str = "detect and respond to security threats";
pub const DEFAULT_CONTACT_INFO: &str = "[Your Contact Information]";
pub const LETTER_DATE_FORMAT: &str = "%B %d, %Y";

/// Everything needed to compose one letter
#[derive(Debug, Clone)]
pub struct LetterRequest {
    pub name: String,
    pub job_title: String,
    /// Empty falls back to the name extracted from the posting
    pub company_name: String,
    pub years_experience: u32,
    pub primary_skill: String,
    pub domain: String,
    pub achievements: Vec<Achievement>,
    pub requirements: Vec<String>,
    pub job: JobDescription,
    pub key_responsibility: String,
    pub contact_info: String,
    pub date: NaiveDate,
    pub proof_examples: usize,
}

impl LetterRequest {
    pub fn new(name: impl Into<String>, job_title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            job_title: job_title.into(),
            company_name: String::new(),
            years_experience: 0,
            primary_skill: String::new(),
            domain: String::new(),
            achievements: Vec::new(),
            requirements: Vec::new(),
            job: JobDescription::empty(),
            key_responsibility: DEFAULT_KEY_RESPONSIBILITY.to_string(),
            contact_info: DEFAULT_CONTACT_INFO.to_string(),
            date,
            proof_examples: DEFAULT_TOP_N,
        }
    }

    /// Number quoted in the achievement-style opening
    fn achievement_count(&self) -> usize {
        self.achievements.len().max(1)
    }
}

/// Generated letter, split into its parts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverLetterSections {
    pub style: LetterStyle,
    pub opening: String,
    pub body: String,
    pub closing: String,
    pub full_text: String,
    pub company_info: CompanyInfo,
    pub matches: Vec<RequirementMatch>,
}

/// Letters keyed by style
pub type CoverLetterVariantSet = BTreeMap<LetterStyle, CoverLetterSections>;

pub(crate) fn resolved_company_name<'a>(request: &'a LetterRequest, company: &'a CompanyInfo) -> &'a str {
    if request.company_name.trim().is_empty() {
        &company.company_name
    } else {
        request.company_name.trim()
    }
}

pub fn compose_opening(request: &LetterRequest, company: &CompanyInfo, style: OpeningStyle) -> String {
    let years = request.years_experience.to_string();
    let achievement_count = request.achievement_count().to_string();
    let company_benefit = company.company_benefit();

    fill_template(
        style.template(),
        &[
            ("job_title", request.job_title.as_str()),
            ("company_name", resolved_company_name(request, company)),
            ("years", years.as_str()),
            ("primary_skill", request.primary_skill.as_str()),
            ("domain", request.domain.as_str()),
            ("key_responsibility", request.key_responsibility.as_str()),
            ("achievement_count", achievement_count.as_str()),
            ("company_benefit", company_benefit.as_str()),
            ("company_value", company.primary_value()),
        ],
    )
}

/// Body paragraphs plus the matches they were built from.
///
/// Falls back to a single generic sentence when no achievement supports any
/// requirement.
pub fn compose_body(
    request: &LetterRequest,
    company: &CompanyInfo,
    style: BodyStyle,
) -> (String, Vec<RequirementMatch>) {
    let company_name = resolved_company_name(request, company);
    let matches = select_proof_examples(&request.achievements, &request.requirements, request.proof_examples);

    if matches.is_empty() {
        debug!("No proof examples matched; using fallback body");
        let body = format!(
            "I am confident that my experience aligns well with {}'s needs and I would be an excellent addition to your team.",
            company_name
        );
        return (body, matches);
    }

    let paragraphs: Vec<String> = matches
        .iter()
        .map(|m| {
            let achievement = m.achievement.trim().trim_end_matches('.');
            fill_template(
                style.match_template(),
                &[
                    ("requirement", m.requirement.as_str()),
                    ("achievement", achievement),
                    ("company_name", company_name),
                    ("primary_skill", request.primary_skill.as_str()),
                    ("domain", request.domain.as_str()),
                ],
            )
        })
        .collect();

    (paragraphs.join("\n\n"), matches)
}

pub fn compose_closing(request: &LetterRequest, company: &CompanyInfo, style: ClosingStyle) -> String {
    fill_template(
        style.template(),
        &[
            ("company_name", resolved_company_name(request, company)),
            ("primary_skill", request.primary_skill.as_str()),
            ("domain", request.domain.as_str()),
            ("company_value", company.primary_value()),
            ("contact_info", request.contact_info.as_str()),
        ],
    )
}

fn assemble_letter(request: &LetterRequest, company_name: &str, opening: &str, body: &str, closing: &str) -> String {
    format!(
        "[Your Address]\n\
         [City, State ZIP]\n\
         \n\
         {date}\n\
         \n\
         {company}\n\
         [Company Address]\n\
         [City, State ZIP]\n\
         \n\
         Dear Hiring Manager,\n\
         \n\
         {opening}\n\
         \n\
         {body}\n\
         \n\
         {closing}\n\
         \n\
         Sincerely,\n\
         \n\
         {name}\n\
         [Your Email]\n\
         [Your Phone]\n",
        date = request.date.format(LETTER_DATE_FORMAT),
        company = company_name,
        opening = opening,
        body = body,
        closing = closing,
        name = request.name,
    )
}

/// Compose a complete letter in one style
pub fn generate_cover_letter(request: &LetterRequest, style: LetterStyle) -> CoverLetterSections {
    let company_info = extract_company_info(&request.job);

    let opening = compose_opening(request, &company_info, style.opening());
    let (body, matches) = compose_body(request, &company_info, style.body());
    let closing = compose_closing(request, &company_info, style.closing());
    let full_text = assemble_letter(
        request,
        resolved_company_name(request, &company_info),
        &opening,
        &body,
        &closing,
    );

    info!(
        "Composed {} cover letter for {} ({} proof examples)",
        style,
        request.job_title,
        matches.len()
    );

    CoverLetterSections {
        style,
        opening,
        body,
        closing,
        full_text,
        company_info,
        matches,
    }
}

/// Compose the enthusiastic, professional and achievement variants
pub fn generate_cover_letter_variants(request: &LetterRequest) -> CoverLetterVariantSet {
    LetterStyle::VARIANTS
        .iter()
        .map(|style| (*style, generate_cover_letter(request, *style)))
        .collect()
}
