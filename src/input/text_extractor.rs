//! Job description text extraction from PDF, plain text and markdown files

use crate::error::{Result, TailorError};
use once_cell::sync::Lazy;
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::path::Path;
use tokio::fs;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());
static BLOCK_END_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</(?:h[1-6]|li|div|tr|ul|ol)>").unwrap());

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            TailorError::PdfExtraction(format!("Failed to extract text from PDF '{}': {}", path.display(), e))
        })?;
        Ok(text)
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        Ok(fs::read_to_string(path).await?)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await?;
        Ok(markdown_to_text(&markdown_content))
    }
}

pub struct HtmlExtractor;

impl TextExtractor for HtmlExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let html_content = fs::read_to_string(path).await?;
        Ok(html_to_text(&html_content))
    }
}

/// Render markdown to HTML
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}

/// Strip markdown down to plain text lines, dropping blank lines
pub fn markdown_to_text(markdown: &str) -> String {
    html_to_text(&markdown_to_html(markdown))
}

/// Strip tags and common entities from HTML, dropping blank lines
pub fn html_to_text(html: &str) -> String {
    let text = html
        .replace("<br>", "\n")
        .replace("<br />", "\n")
        .replace("</p>", "\n\n")
        .replace("<li>", "- ");

    let text = BLOCK_END_RE.replace_all(&text, "\n");
    let clean_text = TAG_RE.replace_all(&text, "");
    let clean_text = clean_text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    clean_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
