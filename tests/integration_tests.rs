//! Integration tests for the resume tailor

use chrono::NaiveDate;
use resume_tailor::config::{Config, ConverterKind, DocumentFormat};
use resume_tailor::input::manager::InputManager;
use resume_tailor::letter::LetterStyle;
use resume_tailor::letter::company::CompanySize;
use resume_tailor::processing::keywords::Domain;
use resume_tailor::tailor::{GenerationOptions, Generator};
use resume_tailor::TailorError;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const FIXTURES: &str = "tests/fixtures";

fn fixture(name: &str) -> PathBuf {
    Path::new(FIXTURES).join(name)
}

fn test_config(output: &TempDir, converter: ConverterKind) -> Config {
    let mut config = Config::default();
    config.paths.data_dir = PathBuf::from(FIXTURES);
    config.paths.private_dir = output.path().join("private");
    config.paths.roles_dir = fixture("roles");
    config.paths.output_dir = output.path().join("output");
    config.conversion.converter = converter;
    config
}

fn options(format: DocumentFormat, convert: bool) -> GenerationOptions {
    GenerationOptions {
        format,
        convert,
        date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
        letter_style: None,
        job_override: None,
    }
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let text = manager.extract_text(&fixture("job_soc.txt")).await.unwrap();

    assert!(text.contains("SecureOps"));
    assert!(text.contains("Splunk"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let text = manager.extract_text(&fixture("job.md")).await.unwrap();

    assert!(text.contains("Application Security Engineer"));
    assert!(text.contains("Brightwave"));
    // Should not contain markdown formatting
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = fixture("job_soc.txt");

    let text1 = manager.extract_text(&path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(&path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let result = manager.extract_text(&fixture("unsupported.xyz")).await;
    assert!(matches!(result, Err(TailorError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let result = manager.extract_text(&fixture("nonexistent.txt")).await;
    assert!(matches!(result, Err(TailorError::InvalidInput(_))));
}

#[tokio::test]
async fn test_profile_and_role_fixtures_load() {
    let manager = InputManager::new();
    let profile = manager.load_profile(&fixture("master_profile.json")).await.unwrap();
    assert_eq!(profile.basics.name, "Violet Figueroa");
    assert_eq!(profile.summaries.len(), 3);
    assert!(profile.find_project("portfolio").is_some());

    let role = manager.load_role_config(&fixture("roles/soc_analyst.json")).await.unwrap();
    assert_eq!(role.domain_tag().unwrap(), Some(Domain::SocAnalyst));
    assert_eq!(role.letter_style().unwrap(), Some(LetterStyle::Professional));
}

#[tokio::test]
async fn test_generate_role_documents() {
    let dir = TempDir::new().unwrap();
    let mut generator = Generator::new(test_config(&dir, ConverterKind::None));
    let profile = generator.load_profile().await.unwrap();

    let files = generator
        .generate(&profile, Some(&fixture("roles/soc_analyst.json")), &options(DocumentFormat::Markdown, true))
        .await
        .unwrap();

    assert_eq!(files.role_name, "SOC_Analyst");
    assert_eq!(files.resume, dir.path().join("output/Resume_SOC_Analyst.md"));
    assert!(files.pdfs.is_empty());

    let resume = std::fs::read_to_string(&files.resume).unwrap();
    assert!(resume.starts_with("# Violet Figueroa"));
    assert!(resume.contains("**SOC Analyst | "));
    assert!(resume.contains("| Threat Detection**"));
    assert!(resume.contains("SOC analyst with hands-on SIEM"));
    // role project order wins over profile order
    let phish = resume.find("Phishing Analyzer").unwrap();
    let homelab = resume.find("Detection Homelab").unwrap();
    assert!(phish < homelab);
    assert!(!resume.contains("Portfolio"));
    assert!(resume.contains("25%"));

    let letter_path = files.cover_letter.unwrap();
    assert_eq!(letter_path, dir.path().join("output/Cover_Letter_SOC_Analyst.md"));
    let letter = std::fs::read_to_string(letter_path).unwrap();
    assert!(letter.contains("March 05, 2024"));
    assert!(letter.contains("**Re: SOC Analyst**"));
    assert!(letter.contains("SecureOps"));
    assert!(letter.contains("Led incident response for 50+ security incidents"));
}

#[tokio::test]
async fn test_generate_all_starts_with_general() {
    let dir = TempDir::new().unwrap();
    let mut generator = Generator::new(test_config(&dir, ConverterKind::None));
    let profile = generator.load_profile().await.unwrap();

    let results = generator
        .generate_all(&profile, &options(DocumentFormat::Html, false))
        .await
        .unwrap();

    let names: Vec<_> = results.iter().map(|files| files.role_name.as_str()).collect();
    assert_eq!(names, vec!["General", "SOC_Analyst"]);
    assert!(results[0].cover_letter.is_none());

    let general = std::fs::read_to_string(dir.path().join("output/Resume_General.html")).unwrap();
    assert!(general.starts_with("<!DOCTYPE html>"));
    assert!(general.contains("Security analyst focused on monitoring"));
    assert!(dir.path().join("output/Cover_Letter_SOC_Analyst.html").exists());
}

#[tokio::test]
async fn test_builtin_converter_writes_pdfs() {
    let dir = TempDir::new().unwrap();
    let mut generator = Generator::new(test_config(&dir, ConverterKind::Builtin));
    let profile = generator.load_profile().await.unwrap();

    let files = generator
        .generate(&profile, None, &options(DocumentFormat::Markdown, true))
        .await
        .unwrap();

    assert_eq!(files.pdfs, vec![dir.path().join("output/Resume_General.pdf")]);
    assert!(files.warnings.is_empty());
    let bytes = std::fs::read(&files.pdfs[0]).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_missing_pandoc_is_not_fatal() {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(&dir, ConverterKind::Pandoc);
    config.conversion.pandoc_path = "/nonexistent/pandoc-binary".to_string();
    let mut generator = Generator::new(config);
    let profile = generator.load_profile().await.unwrap();

    let files = generator
        .generate(&profile, None, &options(DocumentFormat::Markdown, true))
        .await
        .unwrap();

    assert!(files.resume.exists());
    assert!(files.pdfs.is_empty());
    assert_eq!(files.warnings.len(), 1);
    assert!(files.warnings[0].contains("Pandoc not found"));
}

#[tokio::test]
async fn test_job_override_replaces_role_job() {
    let dir = TempDir::new().unwrap();
    let mut generator = Generator::new(test_config(&dir, ConverterKind::None));
    let role_path = fixture("roles/soc_analyst.json");
    let role = generator.load_role(&role_path).await.unwrap();

    let from_role = generator.resolve_job(&role, Some(&role_path), None).await.unwrap().unwrap();
    assert!(from_role.raw().contains("SecureOps"));

    let overridden = generator
        .resolve_job(&role, Some(&role_path), Some(&fixture("job.md")))
        .await
        .unwrap()
        .unwrap();
    assert!(overridden.raw().contains("Brightwave"));
}

#[tokio::test]
async fn test_analyze_job_fixture() {
    let dir = TempDir::new().unwrap();
    let mut generator = Generator::new(test_config(&dir, ConverterKind::None));
    let profile = generator.load_profile().await.unwrap();
    let job = generator.inputs().load_job(&fixture("job_soc.txt")).await.unwrap();

    let analysis = generator
        .engine()
        .analyze(Some(&profile), &job, Some(Domain::SocAnalyst))
        .unwrap();

    assert!(analysis.keywords.tools.contains(&"Splunk".to_string()));
    assert_eq!(analysis.keywords.years_required(), Some(3));
    assert_eq!(analysis.company.company_name, "SecureOps");
    assert_eq!(analysis.company.company_size, CompanySize::Startup);
    assert_eq!(analysis.summary.unwrap().key, "soc");
    assert_eq!(analysis.ranked_skills.first().map(|s| s.score), Some(3));
}

#[tokio::test]
async fn test_cover_letter_variants_from_fixtures() {
    let dir = TempDir::new().unwrap();
    let mut generator = Generator::new(test_config(&dir, ConverterKind::None));
    let profile = generator.load_profile().await.unwrap();
    let role_path = fixture("roles/soc_analyst.json");
    let role = generator.load_role(&role_path).await.unwrap();
    let job = generator.resolve_job(&role, Some(&role_path), None).await.unwrap();
    let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();

    let letters = generator
        .engine()
        .cover_letter_variants(&profile, &role, job.as_ref(), date)
        .unwrap();

    let styles: Vec<_> = letters.iter().map(|letter| letter.sections.style).collect();
    assert_eq!(
        styles,
        vec![LetterStyle::Enthusiastic, LetterStyle::Professional, LetterStyle::Achievement]
    );
    for letter in &letters {
        assert_eq!(letter.company_name, "SecureOps");
        assert!(letter.sections.full_text.contains("Dear Hiring Manager,"));
        assert!(!letter.sections.matches.is_empty());
    }
}
