//! Terminal and JSON presentation of command results

use crate::error::Result;
use crate::processing::impact::ImpactVariantSet;
use crate::tailor::{GeneratedFiles, JobAnalysis, TailoredLetter};
use colored::{Color, Colorize};

pub trait OutputFormatter {
    fn format_analysis(&self, analysis: &JobAnalysis) -> Result<String>;
    fn format_variants(&self, variants: &ImpactVariantSet) -> Result<String>;
    fn format_letters(&self, letters: &[TailoredLetter]) -> Result<String>;
    fn format_generated(&self, generated: &[GeneratedFiles]) -> Result<String>;
}

pub struct ConsoleFormatter {
    use_colors: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            3 => "▒",
            _ => "░",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            3 => Color::Yellow,
            _ => Color::White,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_list(&self, label: &str, items: &[String], color: Color) -> String {
        if items.is_empty() {
            return format!("{}: {}\n", label, self.colorize("none", Color::BrightBlack));
        }
        let joined = items
            .iter()
            .map(|item| self.colorize(item, color))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}: {}\n", label, joined)
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_analysis(&self, analysis: &JobAnalysis) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("JOB DESCRIPTION ANALYSIS", 1));
        output.push_str(&format!(
            "Words: {} | Domain: {}\n",
            analysis.word_count,
            analysis
                .domain
                .map(|domain| domain.to_string())
                .unwrap_or_else(|| "none".to_string())
        ));

        output.push_str(&self.format_header("Keywords", 2));
        output.push_str(&self.format_list("Tools", &analysis.keywords.tools, Color::Cyan));
        output.push_str(&self.format_list("Concepts", &analysis.keywords.concepts, Color::Cyan));
        output.push_str(&self.format_list("Frameworks", &analysis.keywords.frameworks, Color::Cyan));
        output.push_str(&self.format_list("Other", &analysis.keywords.custom, Color::Magenta));

        let company = &analysis.company;
        output.push_str(&self.format_header("Company", 2));
        output.push_str(&format!("Name: {}\n", self.colorize(&company.company_name, Color::Cyan)));
        output.push_str(&format!(
            "Size: {} | Industry: {} | Location: {}\n",
            company.company_size, company.industry, company.location
        ));
        let values: Vec<String> = company.values.iter().map(|value| value.to_string()).collect();
        output.push_str(&self.format_list("Values", &values, Color::Green));

        if let Some(summary) = &analysis.summary {
            output.push_str(&self.format_header("Best Summary", 2));
            output.push_str(&format!(
                "{} (confidence {:.0}%)\n",
                self.colorize(&summary.key, Color::Green),
                summary.confidence * 100.0
            ));
            output.push_str(&format!("  {}\n", summary.text));
        }

        if !analysis.ranked_skills.is_empty() {
            output.push_str(&self.format_header("Skills by Relevance", 2));
            for scored in &analysis.ranked_skills {
                let color = match scored.score {
                    3 => Color::Green,
                    1 | 2 => Color::Yellow,
                    _ => Color::White,
                };
                output.push_str(&format!("  {} {}\n", self.colorize(&format!("[{}]", scored.score), color), scored.skill));
            }
        }

        Ok(output)
    }

    fn format_variants(&self, variants: &ImpactVariantSet) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("IMPACT VARIANTS", 1));
        for variant in &variants.variants {
            let marker = if variant.angle == variants.recommended { "★" } else { " " };
            output.push_str(&format!(
                "{} {} (score {:.1})\n",
                self.colorize(marker, Color::Yellow),
                self.colorize(variant.angle.as_str(), Color::Cyan),
                variant.score
            ));
            output.push_str(&format!("  • {}\n", variant.bullet));
        }
        output.push_str(&format!(
            "\nRecommended: {} ({} variants)\n",
            self.colorize(variants.recommended.as_str(), Color::Green),
            variants.count
        ));

        Ok(output)
    }

    fn format_letters(&self, letters: &[TailoredLetter]) -> Result<String> {
        let mut output = String::new();

        for letter in letters {
            output.push_str(&self.format_header(
                &format!("{} cover letter: {} at {}", letter.sections.style, letter.job_title, letter.company_name),
                2,
            ));
            output.push_str(&letter.sections.full_text);
            if !letter.sections.matches.is_empty() {
                output.push_str(&self.format_header("Proof examples", 3));
                for m in &letter.sections.matches {
                    output.push_str(&format!(
                        "  • {} → {} ({:.0}%)\n",
                        self.colorize(&m.requirement, Color::Cyan),
                        m.achievement,
                        m.confidence * 100.0
                    ));
                }
            }
        }

        Ok(output)
    }

    fn format_generated(&self, generated: &[GeneratedFiles]) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("GENERATED DOCUMENTS", 1));
        for files in generated {
            output.push_str(&self.format_header(&files.role_name, 3));
            output.push_str(&format!("  {} {}\n", self.colorize("✓", Color::Green), files.resume.display()));
            if let Some(letter) = &files.cover_letter {
                output.push_str(&format!("  {} {}\n", self.colorize("✓", Color::Green), letter.display()));
            }
            for pdf in &files.pdfs {
                output.push_str(&format!("  {} {}\n", self.colorize("✓", Color::Green), pdf.display()));
            }
            for warning in &files.warnings {
                output.push_str(&format!("  {} {}\n", self.colorize("⚠", Color::Yellow), warning));
            }
        }

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn to_json<T: serde::Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_analysis(&self, analysis: &JobAnalysis) -> Result<String> {
        self.to_json(analysis)
    }

    fn format_variants(&self, variants: &ImpactVariantSet) -> Result<String> {
        self.to_json(variants)
    }

    fn format_letters(&self, letters: &[TailoredLetter]) -> Result<String> {
        self.to_json(letters)
    }

    fn format_generated(&self, generated: &[GeneratedFiles]) -> Result<String> {
        self.to_json(generated)
    }
}
