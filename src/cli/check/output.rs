//! Output and threshold handling for the check command

use anyhow::{Context, Result};
use console::style;
use secupatch::models::{ComplianceReport, ComplianceStatus};
use secupatch::reporters::{self, OutputFormat};
use std::path::{Path, PathBuf};

/// Render the report and write it to stdout or a file
pub(super) fn format_and_output(
    report: &ComplianceReport,
    format: OutputFormat,
    output_path: Option<&Path>,
) -> Result<()> {
    let output = reporters::report_with_format(report, format)?;

    let Some(path) = output_path else {
        // Keep stdout clean for machine-readable formats
        if format.is_machine_readable() {
            print!("{}", output);
        } else {
            println!("{}", output);
        }
        return Ok(());
    };

    let out_path = resolve_output_path(path, format);
    std::fs::write(&out_path, &output)
        .with_context(|| format!("Failed to write report to {}", out_path.display()))?;
    // stderr, so stdout stays usable in pipelines
    eprintln!(
        "Report written to: {}",
        style(out_path.display()).cyan()
    );
    Ok(())
}

/// A directory gets the default report file name for the format
fn resolve_output_path(path: &Path, format: OutputFormat) -> PathBuf {
    if path.is_dir() {
        path.join(reporters::default_file_name(format))
    } else {
        path.to_path_buf()
    }
}

/// Exit with code 1 if any server is at the fail-on tier or worse
pub(super) fn check_fail_threshold(fail_on: &Option<String>, report: &ComplianceReport) -> Result<()> {
    if let Some(ref threshold) = fail_on {
        let tier: ComplianceStatus = threshold.parse()?;
        if report.summary.any_at_or_below(tier) {
            eprintln!("Failing due to --fail-on={} threshold", threshold);
            std::process::exit(1);
        }
    }
    Ok(())
}
