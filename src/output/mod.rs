//! Rendering, presentation and PDF conversion of generated documents

pub mod converter;
pub mod formatter;
pub mod render;

pub use converter::{Converter, DocumentConverter};
pub use formatter::{ConsoleFormatter, JsonFormatter, OutputFormatter};
