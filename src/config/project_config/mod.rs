//! Project-level configuration support
//!
//! Loads configuration from `secupatch.toml`, `.secupatchrc.json`,
//! or `.secupatch.yaml` files in the working directory.
//!
//! # Configuration Format
//!
//! ```toml
//! # secupatch.toml
//!
//! [scoring]
//! policy = "graduated"           # or "binary"
//! recency_anchor = "2024-01-01"  # day the recency bonus counts from
//!
//! [report]
//! company = "Acme Corp"
//! reviewer = "Jane Doe"
//!
//! [defaults]
//! format = "text"
//! fail_on = "non-compliant"
//! ```

use crate::scoring::{default_recency_anchor, PolicyKind, ScoringPolicy};
use anyhow::Context;
use chrono::NaiveDate;
use serde::de::{self, Deserializer};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// File names searched, in order
pub const CONFIG_FILE_NAMES: &[&str] = &[
    "secupatch.toml",
    ".secupatchrc.json",
    ".secupatch.yaml",
    ".secupatch.yml",
];

/// Project configuration loaded from secupatch.toml or similar
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProjectConfig {
    /// Scoring configuration
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Export metadata defaults
    #[serde(default)]
    pub report: ReportConfig,

    /// Default CLI flags
    #[serde(default)]
    pub defaults: CliDefaults,
}

/// Scoring configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    /// Scoring policy (default: graduated)
    #[serde(default)]
    pub policy: PolicyKind,

    /// Day the graduated policy's recency bonus counts from (default: 2024-01-01).
    /// Either a quoted string or a bare TOML date.
    #[serde(default = "default_recency_anchor", deserialize_with = "deserialize_anchor")]
    pub recency_anchor: NaiveDate,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            policy: PolicyKind::default(),
            recency_anchor: default_recency_anchor(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AnchorRepr {
    Text(String),
    TomlDate(toml::value::Datetime),
}

fn deserialize_anchor<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    match AnchorRepr::deserialize(deserializer)? {
        AnchorRepr::Text(text) => NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").map_err(|_| {
            de::Error::custom(format!("invalid recency_anchor '{text}', expected YYYY-MM-DD"))
        }),
        AnchorRepr::TomlDate(datetime) => match (datetime.date, datetime.time) {
            (Some(date), None) => NaiveDate::from_ymd_opt(
                i32::from(date.year),
                u32::from(date.month),
                u32::from(date.day),
            )
            .ok_or_else(|| de::Error::custom(format!("invalid recency_anchor {datetime}"))),
            _ => Err(de::Error::custom(format!(
                "recency_anchor must be a date without a time, found {datetime}"
            ))),
        },
    }
}

impl ScoringConfig {
    pub fn policy(&self) -> ScoringPolicy {
        self.policy.into_policy(self.recency_anchor)
    }
}

/// Metadata stamped onto exported reports
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ReportConfig {
    #[serde(default)]
    pub company: Option<String>,

    #[serde(default)]
    pub reviewer: Option<String>,
}

/// Default CLI flags that can be set in project config
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CliDefaults {
    /// Default output format (text, json, markdown, csv)
    #[serde(default)]
    pub format: Option<String>,

    /// Fail-on tier threshold for CI
    #[serde(default)]
    pub fail_on: Option<String>,
}

/// Load project configuration from a directory.
///
/// Searches for configuration files in this order:
/// 1. `secupatch.toml`
/// 2. `.secupatchrc.json`
/// 3. `.secupatch.yaml` / `.secupatch.yml`
///
/// Returns default configuration if no usable config file is found.
pub fn load_project_config(dir: &Path) -> ProjectConfig {
    for name in CONFIG_FILE_NAMES {
        let path = dir.join(name);
        if !path.exists() {
            continue;
        }
        match load_config_file(&path) {
            Ok(config) => {
                debug!("Loaded project config from {}", path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {:#}", path.display(), e);
            }
        }
    }

    debug!("No project config found, using defaults");
    ProjectConfig::default()
}

/// Load configuration from an explicit file; the format follows the extension
pub fn load_config_file(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let config = match extension.as_str() {
        "toml" => toml::from_str(&content)
            .with_context(|| format!("Invalid TOML in {}", path.display()))?,
        "json" => serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON in {}", path.display()))?,
        "yaml" | "yml" => serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid YAML in {}", path.display()))?,
        other => anyhow::bail!(
            "Unsupported config format '{}' for {}. Use .toml, .json, .yaml or .yml",
            other,
            path.display()
        ),
    };
    Ok(config)
}
