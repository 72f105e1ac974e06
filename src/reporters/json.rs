//! JSON reporter
//!
//! Outputs the full ComplianceReport as pretty-printed JSON.
//! Useful for machine consumption, piping to jq, or further processing.

use crate::models::ComplianceReport;
use anyhow::Result;

/// Render report as JSON
pub fn render(report: &ComplianceReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
