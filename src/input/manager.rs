//! Input manager for profiles, role configurations and job descriptions

use crate::error::{Result, TailorError};
use crate::input::file_detector::FileType;
use crate::input::profile::{MasterProfile, RoleConfig};
use crate::input::text_extractor::{
    HtmlExtractor, MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
use crate::processing::text_processor::JobDescription;
use log::{debug, info};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;

pub const PROFILE_FILE_NAME: &str = "master_profile.json";

pub struct InputManager {
    cache: HashMap<PathBuf, String>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Read a job description file (PDF, text, markdown or HTML) as plain text
    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(path) {
                debug!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(TailorError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let text = match self.detect_file_type(path)? {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Html => {
                info!("Processing HTML file: {}", path.display());
                HtmlExtractor.extract(path).await?
            }
            FileType::Json | FileType::Unknown => {
                return Err(TailorError::UnsupportedFormat(format!(
                    "Cannot read a job description from: {}",
                    path.display()
                )));
            }
        };

        if self.enable_cache {
            self.cache.insert(path.to_path_buf(), text.clone());
        }

        Ok(text)
    }

    pub async fn load_job(&mut self, path: &Path) -> Result<JobDescription> {
        let text = self.extract_text(path).await?;
        Ok(JobDescription::new(text))
    }

    pub async fn load_profile(&self, path: &Path) -> Result<MasterProfile> {
        info!("Loading profile from {}", path.display());
        let json = self.read_json_file(path).await?;
        MasterProfile::from_json(&json).map_err(|e| with_path(e, path))
    }

    /// Private profile when present, otherwise the bundled example profile
    pub fn locate_profile(private_dir: &Path, data_dir: &Path) -> Result<PathBuf> {
        let private_path = private_dir.join(PROFILE_FILE_NAME);
        if private_path.exists() {
            info!("Using private data from {}", private_path.display());
            return Ok(private_path);
        }

        let data_path = data_dir.join(PROFILE_FILE_NAME);
        if data_path.exists() {
            info!("Using example data from {}", data_path.display());
            return Ok(data_path);
        }

        Err(TailorError::InvalidInput(format!(
            "No {} found in {} or {}",
            PROFILE_FILE_NAME,
            private_dir.display(),
            data_dir.display()
        )))
    }

    pub async fn load_role_config(&self, path: &Path) -> Result<RoleConfig> {
        debug!("Loading role config from {}", path.display());
        let json = self.read_json_file(path).await?;
        RoleConfig::from_json(&json).map_err(|e| with_path(e, path))
    }

    /// Role files (`*.json`) in a directory, sorted by file name
    pub async fn list_role_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(TailorError::InvalidInput(format!(
                "Roles directory does not exist: {}",
                dir.display()
            )));
        }

        let mut entries = fs::read_dir(dir).await?;
        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.is_file() && FileType::from_path(&path) == Some(FileType::Json) {
                files.push(path);
            }
        }
        files.sort();

        debug!("Found {} role files in {}", files.len(), dir.display());
        Ok(files)
    }

    async fn read_json_file(&self, path: &Path) -> Result<String> {
        if self.detect_file_type(path)? != FileType::Json {
            return Err(TailorError::UnsupportedFormat(format!(
                "Expected a JSON file: {}",
                path.display()
            )));
        }
        fs::read_to_string(path).await.map_err(|e| {
            TailorError::InvalidInput(format!("Cannot read {}: {}", path.display(), e))
        })
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        FileType::from_path(path).ok_or_else(|| {
            TailorError::InvalidInput(format!("File has no extension: {}", path.display()))
        })
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

fn with_path(err: TailorError, path: &Path) -> TailorError {
    match err {
        TailorError::Serialization(e) => {
            TailorError::InvalidInput(format!("Malformed JSON in {}: {}", path.display(), e))
        }
        other => other,
    }
}
