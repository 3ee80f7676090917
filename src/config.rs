//! Configuration management for the resume tailor

use crate::error::{Result, TailorError};
use crate::processing::skills::DEFAULT_MAX_SKILLS;
use crate::processing::text_processor::DEFAULT_MAX_KEYWORD_DENSITY;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub tailoring: TailoringConfig,
    pub conversion: ConversionConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub data_dir: PathBuf,
    /// Checked for a profile before `data_dir`
    pub private_dir: PathBuf,
    pub roles_dir: PathBuf,
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TailoringConfig {
    pub max_skills: usize,
    pub proof_examples: usize,
    pub default_project_category: String,
    pub default_project_limit: usize,
    pub max_keyword_density: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    pub converter: ConverterKind,
    pub pandoc_path: String,
    pub margin: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: DocumentFormat,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConverterKind {
    Pandoc,
    Builtin,
    None,
}

/// Format generated documents are written in before PDF conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Markdown,
    Html,
}

impl DocumentFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Markdown => "md",
            DocumentFormat::Html => "html",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Markdown => f.write_str("markdown"),
            DocumentFormat::Html => f.write_str("html"),
        }
    }
}

impl FromStr for DocumentFormat {
    type Err = TailorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "md" | "markdown" => Ok(DocumentFormat::Markdown),
            "html" | "htm" => Ok(DocumentFormat::Html),
            _ => Err(TailorError::unknown_variant("format", s, &["md", "markdown", "html"])),
        }
    }
}

impl FromStr for ConverterKind {
    type Err = TailorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pandoc" => Ok(ConverterKind::Pandoc),
            "builtin" => Ok(ConverterKind::Builtin),
            "none" => Ok(ConverterKind::None),
            _ => Err(TailorError::unknown_variant("converter", s, &["pandoc", "builtin", "none"])),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            private_dir: PathBuf::from("private"),
            roles_dir: PathBuf::from("data").join("roles"),
            output_dir: PathBuf::from("output"),
        }
    }
}

impl Default for TailoringConfig {
    fn default() -> Self {
        Self {
            max_skills: DEFAULT_MAX_SKILLS,
            proof_examples: 2,
            default_project_category: "cyber".to_string(),
            default_project_limit: 5,
            max_keyword_density: DEFAULT_MAX_KEYWORD_DENSITY,
        }
    }
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            converter: ConverterKind::Pandoc,
            pandoc_path: "pandoc".to_string(),
            margin: "1in".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: DocumentFormat::Markdown,
            color_output: true,
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults there on first run
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TailorError::Configuration(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| TailorError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| TailorError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-tailor")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        if self.tailoring.max_skills == 0 {
            return Err(TailorError::Configuration("tailoring.max_skills must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.tailoring.max_keyword_density) {
            return Err(TailorError::Configuration(format!(
                "tailoring.max_keyword_density must be within 0..=1, got {}",
                self.tailoring.max_keyword_density
            )));
        }
        Ok(())
    }

    pub fn ensure_output_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.paths.output_dir)?;
        Ok(())
    }
}
