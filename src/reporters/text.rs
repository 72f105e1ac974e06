//! Text (terminal) reporter with colors and formatting

use crate::models::{ComplianceReport, ComplianceStatus};
use anyhow::Result;
use indexmap::IndexMap;

/// Tier colors (ANSI escape codes)
fn status_color(status: ComplianceStatus) -> &'static str {
    match status {
        ComplianceStatus::Compliant => "\x1b[32m",          // Green
        ComplianceStatus::PartiallyCompliant => "\x1b[33m", // Yellow
        ComplianceStatus::NonCompliant => "\x1b[31m",       // Red
    }
}

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Plain-text summary of servers per tier.
///
/// Tiers always appear in the order Compliant, Partially Compliant,
/// Non-Compliant; servers keep their manifest order within a tier.
pub fn format_summary(compliance: &IndexMap<String, ComplianceStatus>) -> String {
    let mut summary = String::from("--- COMPLIANCE SUMMARY ---\n");
    for status in ComplianceStatus::ALL {
        let servers: Vec<&str> = compliance
            .iter()
            .filter(|(_, s)| **s == status)
            .map(|(server, _)| server.as_str())
            .collect();
        let listed = servers
            .iter()
            .map(|s| format!("\"{s}\""))
            .collect::<Vec<_>>()
            .join(", ");
        summary.push_str(&format!(
            "{} Servers ({}): [{}]\n",
            status.label(),
            servers.len(),
            listed
        ));
    }
    summary
}

/// Render report as formatted terminal output
pub fn render(report: &ComplianceReport) -> Result<String> {
    let mut out = String::new();

    // Header
    out.push_str(&format!("\n{BOLD}SecuPatch Compliance Check{RESET}\n"));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    out.push_str(&format!(
        "Servers: {}  Policy: {}",
        report.summary.total(),
        report.policy
    ));
    if let Some(company) = &report.metadata.company {
        out.push_str(&format!("  Company: {company}"));
    }
    if let Some(reviewer) = &report.metadata.reviewer {
        out.push_str(&format!("  Reviewer: {reviewer}"));
    }
    out.push_str("\n\n");

    out.push_str(&format_summary(&report.compliance));
    out.push('\n');

    if report.breakdown.is_empty() {
        out.push_str(&format!("{DIM}Manifest is empty; nothing to check.{RESET}\n"));
        return Ok(out);
    }

    // Drill-down table
    out.push_str(&format!("{BOLD}SERVERS{RESET}\n"));
    out.push_str(&format!(
        "{DIM}  SERVER               SCORE  STATUS                REQUIRED PATCH        LATEST{RESET}\n"
    ));
    out.push_str(&format!(
        "{DIM}  ───────────────────────────────────────────────────────────────────────────────{RESET}\n"
    ));

    for (row, score) in report.rows() {
        let color = status_color(row.status);
        out.push_str(&format!(
            "  {:<20} {:>5}  {color}{:<20}{RESET}  {:<20}  {DIM}{}{RESET}\n",
            truncate(&row.server, 20),
            score,
            row.status.label(),
            truncate(&row.required_patch, 20),
            row.latest_patch_date_label()
        ));
    }
    out.push('\n');

    let non_compliant = report.summary.count(ComplianceStatus::NonCompliant);
    if non_compliant == 0 {
        out.push_str(&format!("{DIM}No non-compliant servers.{RESET}\n"));
    } else {
        out.push_str(&format!(
            "{DIM}{} server(s) need the required patch applied.{RESET}\n",
            non_compliant
        ));
    }

    Ok(out)
}

/// Truncate on char boundaries
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let head: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{head}...")
}
