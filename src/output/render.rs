//! Resume and cover letter rendering
//!
//! Documents are rendered to markdown through compiled-in askama templates;
//! HTML output is the markdown converted with pulldown-cmark and wrapped in a
//! styled page.

use crate::config::DocumentFormat;
use crate::error::Result;
use crate::input::profile::{role_file_stem, Basics};
use crate::input::text_extractor::markdown_to_html;
use crate::tailor::{TailoredLetter, TailoredResume};
use askama::Template;
use log::info;
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Template)]
#[template(
    source = r#"# {{ name }}

**{{ headline }}**
{% if has_contact %}
{{ contact_line }}
{% endif %}
## Summary

{{ summary }}
{% if has_skills %}
## Skills

{{ skills_line }}
{% endif %}{% if has_experience %}
## Experience
{{ experience_md }}{% endif %}{% if has_projects %}
## Projects
{{ projects_md }}{% endif %}{% if has_education %}
## Education

{{ education_md }}{% endif %}{% if has_certifications %}
## Certifications

{{ certifications_md }}{% endif %}"#,
    ext = "md",
    escape = "none"
)]
struct ResumeTemplate {
    name: String,
    headline: String,
    contact_line: String,
    has_contact: bool,
    summary: String,
    skills_line: String,
    has_skills: bool,
    experience_md: String,
    has_experience: bool,
    projects_md: String,
    has_projects: bool,
    education_md: String,
    has_education: bool,
    certifications_md: String,
    has_certifications: bool,
}

#[derive(Template)]
#[template(
    source = r#"{{ name }}
{% if has_contact %}{{ contact_line }}
{% endif %}
{{ date }}

{{ company_name }}

**Re: {{ job_title }}**

Dear Hiring Manager,

{{ opening }}

{{ body }}

{{ closing }}

Sincerely,

{{ name }}
"#,
    ext = "md",
    escape = "none"
)]
struct CoverLetterTemplate {
    name: String,
    contact_line: String,
    has_contact: bool,
    date: String,
    company_name: String,
    job_title: String,
    opening: String,
    body: String,
    closing: String,
}

#[derive(Template)]
#[template(
    source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }}</title>
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.5;
            color: #222;
            max-width: 800px;
            margin: 0 auto;
            padding: 32px;
        }
        h1 { margin-bottom: 4px; }
        h2 {
            color: #1f4e79;
            border-bottom: 1px solid #ccd;
            padding-bottom: 4px;
            margin-top: 24px;
        }
        h3 { margin-bottom: 2px; }
        ul { padding-left: 20px; }
    </style>
</head>
<body>
{{ body_html }}
</body>
</html>
"#,
    ext = "html",
    escape = "none"
)]
struct HtmlPageTemplate {
    title: String,
    body_html: String,
}

fn contact_line(basics: &Basics) -> String {
    let mut parts: Vec<String> = [&basics.email, &basics.phone, &basics.location, &basics.url]
        .into_iter()
        .filter(|part| !part.trim().is_empty())
        .map(|part| part.trim().to_string())
        .collect();
    parts.extend(
        basics
            .profiles
            .iter()
            .filter(|profile| !profile.url.is_empty())
            .map(|profile| profile.url.clone()),
    );
    parts.join(" | ")
}

fn experience_markdown(resume: &TailoredResume) -> String {
    let mut out = String::new();
    for job in &resume.experience {
        out.push_str(&format!("\n### {} | {}\n", job.position, job.company));
        let dates = match (job.start_date.is_empty(), job.end_date.is_empty()) {
            (false, false) => format!("{} - {}", job.start_date, job.end_date),
            (false, true) => format!("{} - Present", job.start_date),
            _ => String::new(),
        };
        let meta: Vec<&str> = [dates.as_str(), job.location.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect();
        if !meta.is_empty() {
            out.push_str(&format!("*{}*\n", meta.join(" | ")));
        }
        out.push('\n');
        for bullet in &job.bullets {
            out.push_str(&format!("- {}\n", bullet));
        }
    }
    out
}

fn projects_markdown(resume: &TailoredResume) -> String {
    let mut out = String::new();
    for project in &resume.projects {
        out.push_str(&format!("\n### {}\n\n", project.name));
        if !project.description.is_empty() {
            out.push_str(&format!("{}\n", project.description));
        }
        if !project.technologies.is_empty() {
            out.push_str(&format!("\n*Technologies:* {}\n", project.technologies.join(", ")));
        }
        for highlight in &project.highlights {
            out.push_str(&format!("- {}\n", highlight));
        }
    }
    out
}

fn education_markdown(resume: &TailoredResume) -> String {
    resume
        .education
        .iter()
        .map(|edu| {
            let degree = [edu.study_type.as_str(), edu.area.as_str()]
                .into_iter()
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(", ");
            let mut line = format!("- **{}**", edu.institution);
            if !degree.is_empty() {
                line.push_str(&format!(" | {}", degree));
            }
            if !edu.end_date.is_empty() {
                line.push_str(&format!(" ({})", edu.end_date));
            }
            line.push('\n');
            line
        })
        .collect()
}

fn certifications_markdown(resume: &TailoredResume) -> String {
    resume
        .certifications
        .iter()
        .map(|cert| {
            let mut line = format!("- {}", cert.name);
            if !cert.issuer.is_empty() {
                line.push_str(&format!(" | {}", cert.issuer));
            }
            if !cert.date.is_empty() {
                line.push_str(&format!(" ({})", cert.date));
            }
            line.push('\n');
            line
        })
        .collect()
}

/// Render a tailored resume as markdown
pub fn render_resume_markdown(resume: &TailoredResume) -> Result<String> {
    let contact = contact_line(&resume.basics);
    let template = ResumeTemplate {
        name: resume.basics.name.clone(),
        headline: resume.headline.clone(),
        has_contact: !contact.is_empty(),
        contact_line: contact,
        summary: resume.summary.clone(),
        has_skills: !resume.skills.is_empty(),
        skills_line: resume.skills.join(" • "),
        has_experience: !resume.experience.is_empty(),
        experience_md: experience_markdown(resume),
        has_projects: !resume.projects.is_empty(),
        projects_md: projects_markdown(resume),
        has_education: !resume.education.is_empty(),
        education_md: education_markdown(resume),
        has_certifications: !resume.certifications.is_empty(),
        certifications_md: certifications_markdown(resume),
    };
    Ok(template.render()?)
}

/// Render a composed cover letter as markdown
pub fn render_cover_letter_markdown(letter: &TailoredLetter) -> Result<String> {
    let contact = contact_line(&letter.basics);
    let template = CoverLetterTemplate {
        name: letter.basics.name.clone(),
        has_contact: !contact.is_empty(),
        contact_line: contact,
        date: letter.date_line(),
        company_name: letter.company_name.clone(),
        job_title: letter.job_title.clone(),
        opening: letter.sections.opening.clone(),
        body: letter.sections.body.clone(),
        closing: letter.sections.closing.clone(),
    };
    Ok(template.render()?)
}

/// Convert rendered markdown to the requested output format
pub fn to_format(markdown: &str, title: &str, format: DocumentFormat) -> Result<String> {
    match format {
        DocumentFormat::Markdown => Ok(markdown.to_string()),
        DocumentFormat::Html => {
            let page = HtmlPageTemplate {
                title: title.to_string(),
                body_html: markdown_to_html(markdown),
            };
            Ok(page.render()?)
        }
    }
}

pub fn resume_file_name(role_title: Option<&str>, format: DocumentFormat) -> String {
    format!("Resume_{}.{}", role_file_stem(role_title), format.extension())
}

pub fn cover_letter_file_name(role_title: Option<&str>, format: DocumentFormat) -> String {
    format!("Cover_Letter_{}.{}", role_file_stem(role_title), format.extension())
}

/// Write a rendered document, creating the output directory if needed
pub async fn write_document(output_dir: &Path, file_name: &str, content: &str) -> Result<PathBuf> {
    fs::create_dir_all(output_dir).await?;
    let path = output_dir.join(file_name);
    fs::write(&path, content).await?;
    info!("Generated {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::profile::{Certification, Project};
    use crate::letter::composer::{generate_cover_letter, LetterRequest};
    use crate::letter::templates::LetterStyle;
    use crate::tailor::TailoredExperience;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn sample_resume() -> TailoredResume {
        let mut resume = TailoredResume {
            role_title: Some("SOC Analyst".to_string()),
            headline: "SOC Analyst | Splunk & Python".to_string(),
            summary_key: "soc".to_string(),
            summary: "Analyst with SIEM depth.".to_string(),
            skills: vec!["Splunk".to_string(), "Python".to_string()],
            ..Default::default()
        };
        resume.basics.name = "Violet Figueroa".to_string();
        resume.basics.email = "violet@example.com".to_string();
        resume.experience.push(TailoredExperience {
            company: "SecureOps".to_string(),
            position: "Analyst".to_string(),
            start_date: "2021".to_string(),
            bullets: vec!["Triaged 40 alerts a day.".to_string()],
            ..Default::default()
        });
        resume.projects.push(Project {
            id: "honeypot".to_string(),
            name: "Honeypot".to_string(),
            technologies: vec!["Python".to_string()],
            ..Default::default()
        });
        resume.certifications.push(Certification {
            name: "Security+".to_string(),
            ..Default::default()
        });
        resume
    }

    #[test]
    fn test_resume_markdown_sections() {
        let markdown = render_resume_markdown(&sample_resume()).unwrap();
        assert!(markdown.starts_with("# Violet Figueroa\n"));
        assert!(markdown.contains("**SOC Analyst | Splunk & Python**"));
        assert!(markdown.contains("violet@example.com"));
        assert!(markdown.contains("## Skills\n\nSplunk • Python"));
        assert!(markdown.contains("### Analyst | SecureOps"));
        assert!(markdown.contains("*2021 - Present*"));
        assert!(markdown.contains("- Triaged 40 alerts a day."));
        assert!(markdown.contains("*Technologies:* Python"));
        assert!(markdown.contains("- Security+"));
        assert!(!markdown.contains("## Education"));
    }

    #[test]
    fn test_html_output_wraps_page() {
        let markdown = render_resume_markdown(&sample_resume()).unwrap();
        let html = to_format(&markdown, "Resume", DocumentFormat::Html).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<h1>Violet Figueroa</h1>"));
        assert!(html.contains("<title>Resume</title>"));
    }

    #[test]
    fn test_cover_letter_markdown() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let mut request = LetterRequest::new("Violet Figueroa", "SOC Analyst", date);
        request.company_name = "SecureOps".to_string();
        let sections = generate_cover_letter(&request, LetterStyle::Professional);
        let mut letter = TailoredLetter {
            role_title: Some("SOC Analyst".to_string()),
            job_title: "SOC Analyst".to_string(),
            company_name: "SecureOps".to_string(),
            date,
            sections,
            basics: Basics::default(),
        };
        letter.basics.name = "Violet Figueroa".to_string();

        let markdown = render_cover_letter_markdown(&letter).unwrap();
        assert!(markdown.starts_with("Violet Figueroa\n\nMarch 05, 2024\n\nSecureOps\n"));
        assert!(markdown.contains("**Re: SOC Analyst**"));
        assert!(markdown.contains("Dear Hiring Manager,"));
        assert!(markdown.trim_end().ends_with("Violet Figueroa"));
    }

    #[test]
    fn test_file_names() {
        assert_eq!(resume_file_name(Some("SOC Analyst II"), DocumentFormat::Markdown), "Resume_SOC_Analyst_II.md");
        assert_eq!(resume_file_name(None, DocumentFormat::Html), "Resume_General.html");
        assert_eq!(
            cover_letter_file_name(Some("AppSec Engineer"), DocumentFormat::Markdown),
            "Cover_Letter_AppSec_Engineer.md"
        );
    }

    #[tokio::test]
    async fn test_write_document_creates_dir() {
        let dir = TempDir::new().unwrap();
        let output_dir = dir.path().join("out");
        let path = write_document(&output_dir, "Resume_General.md", "# Hi\n").await.unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "# Hi\n");
    }
}
