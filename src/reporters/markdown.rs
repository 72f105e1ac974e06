//! Markdown reporter for GitHub-flavored Markdown output
//!
//! Generates reports suitable for:
//! - Pull request comments
//! - Change-management tickets
//! - Audit wikis

use crate::models::{ComplianceReport, ComplianceStatus};
use anyhow::Result;

/// Render report as GitHub-flavored Markdown
pub fn render(report: &ComplianceReport) -> Result<String> {
    let mut md = String::new();

    md.push_str(&render_header(report));
    md.push('\n');

    md.push_str(&render_summary(report));
    md.push('\n');

    md.push_str(&render_breakdown(report));

    Ok(md)
}

fn render_header(report: &ComplianceReport) -> String {
    let mut header = String::from("# 🛡️ Patch Compliance Report\n\n");
    if let Some(company) = &report.metadata.company {
        header.push_str(&format!("**Organization:** {}  \n", escape(company)));
    }
    if let Some(reviewer) = &report.metadata.reviewer {
        header.push_str(&format!("**Reviewer:** {}  \n", escape(reviewer)));
    }
    header.push_str(&format!("**Scoring policy:** {}  \n", report.policy));
    header.push_str(&format!("**Generated:** {}\n", report.metadata.generated_at));
    header
}

fn render_summary(report: &ComplianceReport) -> String {
    let mut md = String::from("## Summary\n\n| Status | Servers | Count |\n|--------|---------|------:|\n");
    for status in ComplianceStatus::ALL {
        let servers = report.summary.servers(status);
        let listed = if servers.is_empty() {
            "-".to_string()
        } else {
            servers.iter().map(|s| escape(s)).collect::<Vec<_>>().join(", ")
        };
        md.push_str(&format!(
            "| {} {} | {} | {} |\n",
            status_emoji(status),
            status.label(),
            listed,
            servers.len()
        ));
    }
    md.push_str(&format!("| **Total** | | **{}** |\n", report.summary.total()));
    md
}

fn render_breakdown(report: &ComplianceReport) -> String {
    if report.breakdown.is_empty() {
        return "## Servers\n\n_The manifest lists no servers._\n".to_string();
    }

    let mut md = String::from(
        "## Servers\n\n| Server | Score | Status | Required Patch | Latest Patch Date |\n\
         |--------|------:|--------|----------------|-------------------|\n",
    );
    for (row, score) in report.rows() {
        md.push_str(&format!(
            "| `{}` | {} | {} {} | `{}` | {} |\n",
            escape(&row.server),
            score,
            status_emoji(row.status),
            row.status.label(),
            escape(&row.required_patch),
            row.latest_patch_date_label()
        ));
    }
    md
}

fn status_emoji(status: ComplianceStatus) -> &'static str {
    match status {
        ComplianceStatus::Compliant => "✅",
        ComplianceStatus::PartiallyCompliant => "⚠️",
        ComplianceStatus::NonCompliant => "❌",
    }
}

/// Escape characters that would break a table cell
fn escape(s: &str) -> String {
    s.replace('|', "\\|")
}
