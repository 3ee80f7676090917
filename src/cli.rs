//! CLI interface for resume tailoring

use crate::config::DocumentFormat;
use crate::letter::LetterStyle;
use crate::processing::keywords::Domain;
use clap::{Parser, Subcommand};
use std::path::Path;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-tailor")]
#[command(about = "Tailored resumes and cover letters from a master profile")]
#[command(long_about = "Generate role-specific resumes and cover letters from a master profile, scoring job descriptions for keywords, skills and summary fit")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate resume (and cover letter) documents
    Generate {
        /// Role configuration file (JSON)
        #[arg(short, long, conflicts_with = "all")]
        role: Option<PathBuf>,

        /// Generate the general resume plus every role in the roles directory
        #[arg(short, long)]
        all: bool,

        /// Job description file overriding the role's own (PDF, TXT, MD, HTML)
        #[arg(short, long)]
        job: Option<PathBuf>,

        /// Skip PDF conversion
        #[arg(long)]
        no_pdf: bool,

        /// Output format: md, html
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Analyze a job description
    Analyze {
        /// Job description file (PDF, TXT, MD, HTML)
        #[arg(short, long)]
        job: PathBuf,

        /// Domain dictionary to extract keywords with
        #[arg(short, long)]
        domain: Option<String>,

        /// Print JSON instead of the console report
        #[arg(long)]
        json: bool,
    },

    /// Rephrase a responsibility as impact bullets
    Bullets {
        /// Responsibility text
        #[arg(short, long)]
        responsibility: String,

        /// Metrics as a JSON object, e.g. '{"time_saved": "10 hours/week"}'
        #[arg(short, long)]
        metrics: Option<String>,

        /// Job description file used to weight angles
        #[arg(short, long)]
        job: Option<PathBuf>,

        /// Extra context considered alongside the responsibility
        #[arg(long)]
        context: Option<String>,

        /// Print JSON instead of the console report
        #[arg(long)]
        json: bool,
    },

    /// Compose a cover letter for a role
    CoverLetter {
        /// Role configuration file (JSON)
        #[arg(short, long)]
        role: PathBuf,

        /// Job description file overriding the role's own
        #[arg(short, long)]
        job: Option<PathBuf>,

        /// Letter style: enthusiastic, professional, achievement, cultural
        #[arg(short, long, conflicts_with = "all_styles")]
        style: Option<String>,

        /// Compose the enthusiastic, professional and achievement variants
        #[arg(long)]
        all_styles: bool,

        /// Print JSON instead of the letter text
        #[arg(long)]
        json: bool,
    },

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Parse and validate the document format
pub fn parse_document_format(format: &str) -> Result<DocumentFormat, String> {
    format.parse().map_err(|e: crate::error::TailorError| e.to_string())
}

pub fn parse_letter_style(style: &str) -> Result<LetterStyle, String> {
    style.parse().map_err(|e: crate::error::TailorError| e.to_string())
}

pub fn parse_domain(domain: &str) -> Result<Domain, String> {
    domain.parse().map_err(|e: crate::error::TailorError| e.to_string())
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
