//! CSV export of the per-server breakdown
//!
//! One row per server, stamped with the company, reviewer and generation
//! time so the file stands on its own as an audit record.

use crate::models::ComplianceReport;
use anyhow::Result;
use std::fmt::Write;

const HEADER: &str = "server,required_patch,status,latest_patch_date,company,reviewer,report_generated";

/// Render the breakdown as CSV
pub fn render(report: &ComplianceReport) -> Result<String> {
    let mut out = String::new();
    writeln!(out, "{HEADER}")?;

    let company = report.metadata.company.as_deref().unwrap_or("");
    let reviewer = report.metadata.reviewer.as_deref().unwrap_or("");

    for row in &report.breakdown {
        writeln!(
            out,
            "{},{},{},{},{},{},{}",
            csv_escape(&row.server),
            csv_escape(&row.required_patch),
            csv_escape(row.status.label()),
            row.latest_patch_date_label(),
            csv_escape(company),
            csv_escape(reviewer),
            csv_escape(&report.metadata.generated_at),
        )?;
    }

    Ok(out)
}

/// Quote a field if it contains a delimiter, quote or line break
fn csv_escape(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
