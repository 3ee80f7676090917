//! Error handling for the resume tailor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TailorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A selection was requested from an empty candidate set
    #[error("No candidates to select from: {0}")]
    NoCandidates(String),

    #[error("Unknown {kind} '{value}'{hint}")]
    UnknownVariant {
        kind: &'static str,
        value: String,
        hint: String,
    },

    #[error("Template rendering error: {0}")]
    Rendering(String),

    #[error("Document conversion error: {0}")]
    Conversion(String),

    #[error("Processing error: {0}")]
    Processing(String),
}

pub type Result<T> = std::result::Result<T, TailorError>;

impl TailorError {
    /// Build an `UnknownVariant` error, suggesting the closest known name
    pub fn unknown_variant(kind: &'static str, value: &str, known: &[&str]) -> Self {
        let lowered = value.to_lowercase();
        let suggestion = known
            .iter()
            .map(|candidate| (candidate, strsim::jaro_winkler(&lowered, candidate)))
            .filter(|(_, similarity)| *similarity >= 0.8)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

        let hint = match suggestion {
            Some((candidate, _)) => format!(" (did you mean '{}'?)", candidate),
            None => format!(" (expected one of: {})", known.join(", ")),
        };

        TailorError::UnknownVariant {
            kind,
            value: value.to_string(),
            hint,
        }
    }
}

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for TailorError {
    fn from(err: anyhow::Error) -> Self {
        TailorError::Processing(err.to_string())
    }
}

impl From<askama::Error> for TailorError {
    fn from(err: askama::Error) -> Self {
        TailorError::Rendering(err.to_string())
    }
}
