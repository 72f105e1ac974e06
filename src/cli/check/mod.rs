//! Check command - load inputs, evaluate, report

mod output;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use secupatch::config::{load_config_file, load_project_config, ProjectConfig};
use secupatch::evaluation::evaluate;
use secupatch::models::{ComplianceReport, ReportMetadata};
use secupatch::parsers::{load_patch_manifest, parse_log_file};
use secupatch::reporters::OutputFormat;
use secupatch::scoring::PolicyKind;
use std::path::PathBuf;
use std::str::FromStr;

/// Resolved arguments for `secupatch check`
#[derive(Debug, Clone)]
pub struct CheckOptions {
    pub config_path: Option<PathBuf>,
    pub manifest: PathBuf,
    pub logs: PathBuf,
    pub policy: Option<String>,
    pub anchor: Option<NaiveDate>,
    pub format: Option<String>,
    pub output: Option<PathBuf>,
    pub company: Option<String>,
    pub reviewer: Option<String>,
    pub fail_on: Option<String>,
}

/// Run the check command
pub fn run(opts: CheckOptions) -> Result<()> {
    let config = load_config(&opts)?;

    // CLI flags > config file > built-in defaults
    let policy_kind = match &opts.policy {
        Some(p) => PolicyKind::from_str(p)?,
        None => config.scoring.policy,
    };
    let anchor = opts.anchor.unwrap_or(config.scoring.recency_anchor);
    let policy = policy_kind.into_policy(anchor);

    let format_name = opts
        .format
        .clone()
        .or_else(|| config.defaults.format.clone())
        .unwrap_or_else(|| "text".to_string());
    let format = OutputFormat::from_str(&format_name)?;
    let fail_on = opts.fail_on.clone().or_else(|| config.defaults.fail_on.clone());

    let manifest = load_patch_manifest(&opts.manifest)
        .with_context(|| format!("Failed to load manifest {}", opts.manifest.display()))?;
    let logs = parse_log_file(&opts.logs)
        .with_context(|| format!("Failed to load patch log {}", opts.logs.display()))?;

    let evaluation = evaluate(&manifest, &logs, &policy);

    let metadata = ReportMetadata::now(
        opts.company.clone().or(config.report.company),
        opts.reviewer.clone().or(config.report.reviewer),
    );
    let report = ComplianceReport::new(evaluation, policy_kind.to_string(), metadata);

    output::format_and_output(&report, format, opts.output.as_deref())?;
    output::check_fail_threshold(&fail_on, &report)
}

fn load_config(opts: &CheckOptions) -> Result<ProjectConfig> {
    match &opts.config_path {
        Some(path) => load_config_file(path),
        None => {
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            Ok(load_project_config(&cwd))
        }
    }
}
