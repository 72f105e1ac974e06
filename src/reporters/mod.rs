//! Output reporters for SecuPatch compliance reports
//!
//! Supports multiple output formats:
//! - `text` - Terminal summary plus per-server drill-down table
//! - `json` - Machine-readable JSON
//! - `markdown` - GitHub-flavored Markdown
//! - `csv` - Breakdown export with company/reviewer metadata

mod csv;
mod json;
mod markdown;
mod text;

pub use text::format_summary;

use crate::models::ComplianceReport;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Markdown,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(anyhow!(
                "Unknown format '{}'. Valid formats: text, json, markdown, csv",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

impl OutputFormat {
    /// Formats meant for other programs rather than a terminal
    pub fn is_machine_readable(&self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::Csv)
    }
}

/// Render a compliance report using an OutputFormat enum
pub fn report_with_format(report: &ComplianceReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(report),
        OutputFormat::Json => json::render(report),
        OutputFormat::Markdown => markdown::render(report),
        OutputFormat::Csv => csv::render(report),
    }
}

/// Get the recommended file extension for a format
pub fn file_extension(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Text => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Csv => "csv",
    }
}

/// File name used when the output path is a directory
pub fn default_file_name(format: OutputFormat) -> String {
    format!("secupatch_compliance_report.{}", file_extension(format))
}
