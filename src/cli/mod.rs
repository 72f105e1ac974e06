//! CLI command definitions and handlers

mod check;
mod init;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use check::CheckOptions;

/// Parse a `YYYY-MM-DD` date argument
fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("'{}' is not a valid date (expected YYYY-MM-DD)", s))
}

/// SecuPatch - server patch compliance checker
///
/// 100% LOCAL - reads a manifest and a log from disk, nothing else.
#[derive(Parser, Debug)]
#[command(name = "secupatch")]
#[command(
    version,
    about = "Check servers against a required-patch manifest and score their compliance",
    long_about = "SecuPatch compares a YAML manifest of required patches per server with a \
CSV log of applied patches, scores every server from 0 to 100 and classifies it as \
Compliant, Partially Compliant or Non-Compliant.",
    after_help = "\
Examples:
  secupatch check manifest.yaml logs.csv                 Text summary and drill-down
  secupatch check manifest.yaml logs.csv --policy binary Applied-or-not scoring
  secupatch check manifest.yaml logs.csv -f csv -o .     Export CSV report
  secupatch init                                         Write a secupatch.toml template"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Config file (default: secupatch.toml, .secupatchrc.json or .secupatch.yaml in the current directory)
    #[arg(long, global = true, env = "SECUPATCH_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate patch compliance for every server in the manifest
    #[command(after_help = "\
Examples:
  secupatch check manifest.yaml logs.csv                          Graduated scoring, text output
  secupatch check manifest.yaml logs.csv --policy binary          100 if applied, else 0
  secupatch check manifest.yaml logs.csv --format json            JSON output for scripting
  secupatch check manifest.yaml logs.csv -f csv -o report.csv     CSV export
  secupatch check manifest.yaml logs.csv --fail-on non-compliant  Exit code 1 on failures (CI mode)")]
    Check {
        /// YAML manifest mapping each server to its required patch
        manifest: PathBuf,

        /// CSV log with columns server, patch, timestamp (YYYY-MM-DD)
        logs: PathBuf,

        /// Scoring policy: graduated (default) or binary
        #[arg(long, short = 'p', value_parser = ["graduated", "binary"])]
        policy: Option<String>,

        /// Day the recency bonus counts from (graduated policy, default 2024-01-01)
        #[arg(long, value_parser = parse_date)]
        anchor: Option<NaiveDate>,

        /// Output format: text, json, markdown (or md), csv
        #[arg(long, short = 'f', value_parser = ["text", "json", "markdown", "md", "csv"])]
        format: Option<String>,

        /// Output file or directory (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Company or school name stamped on the report
        #[arg(long)]
        company: Option<String>,

        /// Reviewer name stamped on the report
        #[arg(long)]
        reviewer: Option<String>,

        /// Exit with code 1 if any server is at this tier or worse
        #[arg(long, value_parser = ["non-compliant", "partially-compliant"])]
        fail_on: Option<String>,
    },

    /// Write a secupatch.toml config file with example settings
    Init {
        /// Directory to write the config file into
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Check {
            manifest,
            logs,
            policy,
            anchor,
            format,
            output,
            company,
            reviewer,
            fail_on,
        } => check::run(CheckOptions {
            config_path: cli.config,
            manifest,
            logs,
            policy,
            anchor,
            format,
            output,
            company,
            reviewer,
            fail_on,
        }),

        Commands::Init { path } => init::run(&path),
    }
}
