//! PDF conversion of generated documents

use crate::config::{ConversionConfig, ConverterKind};
use crate::error::{Result, TailorError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{html_to_text, markdown_to_text};
use log::{debug, info};
use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::fs::File;
use std::io::{BufWriter, ErrorKind};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const FONT_SIZE_PT: f32 = 10.5;
const LINE_HEIGHT_MM: f32 = 5.0;
const DEFAULT_MARGIN_MM: f32 = 25.4;
/// Rough Helvetica glyph width at 10.5pt, used for wrapping
const CHAR_WIDTH_MM: f32 = 1.9;

pub trait DocumentConverter {
    /// Convert `input` to a PDF beside it. `Ok(None)` means conversion was skipped.
    fn convert(&self, input: &Path) -> impl std::future::Future<Output = Result<Option<PathBuf>>> + Send;

    fn name(&self) -> &'static str;
}

/// Shells out to pandoc
pub struct PandocConverter {
    pandoc_path: String,
    margin: String,
}

impl PandocConverter {
    pub fn new(pandoc_path: impl Into<String>, margin: impl Into<String>) -> Self {
        Self {
            pandoc_path: pandoc_path.into(),
            margin: margin.into(),
        }
    }
}

impl DocumentConverter for PandocConverter {
    async fn convert(&self, input: &Path) -> Result<Option<PathBuf>> {
        let output = input.with_extension("pdf");
        debug!("Running {} on {}", self.pandoc_path, input.display());

        let result = Command::new(&self.pandoc_path)
            .arg(input)
            .arg("-o")
            .arg(&output)
            .arg("-V")
            .arg(format!("geometry:margin={}", self.margin))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await;

        let result = match result {
            Ok(result) => result,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(TailorError::Conversion(format!(
                    "Pandoc not found at '{}'. Skipping PDF conversion.",
                    self.pandoc_path
                )));
            }
            Err(e) => return Err(TailorError::Io(e)),
        };

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(TailorError::Conversion(format!(
                "Failed to convert {} to PDF: {}",
                input.display(),
                stderr.trim()
            )));
        }

        info!("Generated PDF: {}", output.display());
        Ok(Some(output))
    }

    fn name(&self) -> &'static str {
        "pandoc"
    }
}

/// Plain-text PDF rendering with printpdf, no external tools needed
pub struct BuiltinPdfConverter {
    margin_mm: f32,
}

impl BuiltinPdfConverter {
    pub fn new(margin: &str) -> Self {
        Self {
            margin_mm: parse_margin_mm(margin).unwrap_or(DEFAULT_MARGIN_MM),
        }
    }
}

impl DocumentConverter for BuiltinPdfConverter {
    async fn convert(&self, input: &Path) -> Result<Option<PathBuf>> {
        let source = tokio::fs::read_to_string(input).await?;
        let text = match FileType::from_path(input) {
            Some(FileType::Html) => html_to_text(&source),
            Some(FileType::Markdown) => markdown_to_text(&source),
            _ => source,
        };

        let output = input.with_extension("pdf");
        let title = input
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| "Document".to_string());
        let margin_mm = self.margin_mm;
        let target = output.clone();

        tokio::task::spawn_blocking(move || write_text_pdf(&title, &text, &target, margin_mm))
            .await
            .map_err(|e| TailorError::Conversion(format!("PDF writer task failed: {}", e)))??;

        info!("Generated PDF: {}", output.display());
        Ok(Some(output))
    }

    fn name(&self) -> &'static str {
        "builtin"
    }
}

pub struct NoopConverter;

impl DocumentConverter for NoopConverter {
    async fn convert(&self, input: &Path) -> Result<Option<PathBuf>> {
        debug!("PDF conversion disabled for {}", input.display());
        Ok(None)
    }

    fn name(&self) -> &'static str {
        "none"
    }
}

/// Converter picked from configuration
pub enum Converter {
    Pandoc(PandocConverter),
    Builtin(BuiltinPdfConverter),
    Noop(NoopConverter),
}

impl Converter {
    pub fn from_config(config: &ConversionConfig) -> Self {
        match config.converter {
            ConverterKind::Pandoc => Converter::Pandoc(PandocConverter::new(&config.pandoc_path, &config.margin)),
            ConverterKind::Builtin => Converter::Builtin(BuiltinPdfConverter::new(&config.margin)),
            ConverterKind::None => Converter::Noop(NoopConverter),
        }
    }
}

impl DocumentConverter for Converter {
    async fn convert(&self, input: &Path) -> Result<Option<PathBuf>> {
        match self {
            Converter::Pandoc(c) => c.convert(input).await,
            Converter::Builtin(c) => c.convert(input).await,
            Converter::Noop(c) => c.convert(input).await,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Converter::Pandoc(c) => c.name(),
            Converter::Builtin(c) => c.name(),
            Converter::Noop(c) => c.name(),
        }
    }
}

/// Parse a CSS-like length (`1in`, `2.5cm`, `20mm`) into millimetres
pub fn parse_margin_mm(margin: &str) -> Option<f32> {
    let margin = margin.trim();
    let (number, factor) = if let Some(n) = margin.strip_suffix("in") {
        (n, 25.4)
    } else if let Some(n) = margin.strip_suffix("cm") {
        (n, 10.0)
    } else if let Some(n) = margin.strip_suffix("mm") {
        (n, 1.0)
    } else if let Some(n) = margin.strip_suffix("pt") {
        (n, 25.4 / 72.0)
    } else {
        return None;
    };
    number.trim().parse::<f32>().ok().filter(|v| *v >= 0.0).map(|v| v * factor)
}

/// Greedy word wrap on character count
fn wrap_line(line: &str, max_chars: usize) -> Vec<String> {
    let mut wrapped = Vec::new();
    let mut current = String::new();
    for word in line.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > max_chars {
            wrapped.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || wrapped.is_empty() {
        wrapped.push(current);
    }
    wrapped
}

fn write_text_pdf(title: &str, text: &str, output: &Path, margin_mm: f32) -> Result<()> {
    let usable_width = (PAGE_WIDTH_MM - 2.0 * margin_mm).max(40.0);
    let max_chars = (usable_width / CHAR_WIDTH_MM) as usize;
    let top = PAGE_HEIGHT_MM - margin_mm;
    let bottom = margin_mm.min(PAGE_HEIGHT_MM / 3.0);

    let (doc, first_page, first_layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| TailorError::Conversion(format!("Failed to load font: {}", e)))?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    let mut y = top;

    // Builtin fonts only cover WinAnsi
    let text = text.replace('•', "-");
    for line in text.lines() {
        for segment in wrap_line(line, max_chars) {
            if y < bottom {
                let (page, page_layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
                layer = doc.get_page(page).get_layer(page_layer);
                y = top;
            }
            layer.use_text(segment, FONT_SIZE_PT, Mm(margin_mm), Mm(y), &font);
            y -= LINE_HEIGHT_MM;
        }
    }

    let file = File::create(output)?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| TailorError::Conversion(format!("Failed to write {}: {}", output.display(), e)))?;
    Ok(())
}
