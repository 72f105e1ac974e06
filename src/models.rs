//! Core data models for SecuPatch
//!
//! These models are used throughout the codebase for representing
//! manifests, patch logs, per-server results and the final report.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Label rendered wherever a server has no patch history.
pub const ABSENT_DATE_LABEL: &str = "N/A";

/// Mapping from server identifier to the patch it is required to have.
///
/// Iteration follows the order the entries were loaded in, which is also
/// the order every report lists servers in.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatchManifest {
    entries: IndexMap<String, String>,
}

impl PatchManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Required patch for a server, if the server is in the manifest
    pub fn required_patch(&self, server: &str) -> Option<&str> {
        self.entries.get(server).map(String::as_str)
    }

    /// (server, required_patch) pairs in manifest order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(s, p)| (s.as_str(), p.as_str()))
    }

    pub fn servers(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>, P: Into<String>> FromIterator<(S, P)> for PatchManifest {
    fn from_iter<I: IntoIterator<Item = (S, P)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(s, p)| (s.into(), p.into()))
                .collect(),
        }
    }
}

/// One patch application event on one server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub server: String,
    pub patch: String,
    pub timestamp: NaiveDate,
}

impl LogEntry {
    pub fn new(server: impl Into<String>, patch: impl Into<String>, timestamp: NaiveDate) -> Self {
        Self {
            server: server.into(),
            patch: patch.into(),
            timestamp,
        }
    }
}

/// Most recent timestamp among the given entries (None when there are none)
pub fn latest_patch_date(logs: &[&LogEntry]) -> Option<NaiveDate> {
    logs.iter().map(|log| log.timestamp).max()
}

/// Compliance tiers, ordered from best to worst
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ComplianceStatus {
    Compliant,
    PartiallyCompliant,
    NonCompliant,
}

impl ComplianceStatus {
    /// All tiers in display order
    pub const ALL: [ComplianceStatus; 3] = [
        ComplianceStatus::Compliant,
        ComplianceStatus::PartiallyCompliant,
        ComplianceStatus::NonCompliant,
    ];

    /// Human-readable label used in reports
    pub fn label(&self) -> &'static str {
        match self {
            ComplianceStatus::Compliant => "Compliant",
            ComplianceStatus::PartiallyCompliant => "Partially Compliant",
            ComplianceStatus::NonCompliant => "Non-Compliant",
        }
    }
}

impl std::fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ComplianceStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "compliant" => Ok(ComplianceStatus::Compliant),
            "partially-compliant" | "partial" => Ok(ComplianceStatus::PartiallyCompliant),
            "non-compliant" | "noncompliant" => Ok(ComplianceStatus::NonCompliant),
            _ => Err(anyhow::anyhow!(
                "Unknown compliance status '{}'. Valid values: compliant, partially-compliant, non-compliant",
                s
            )),
        }
    }
}

/// Numeric score for one server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub server: String,
    pub score: u8,
}

/// Per-server detail row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownRecord {
    pub server: String,
    pub required_patch: String,
    pub status: ComplianceStatus,
    /// Latest timestamp among the server's log entries; None when it has none
    pub latest_patch_date: Option<NaiveDate>,
}

impl BreakdownRecord {
    /// Latest patch date formatted for display, or `N/A`
    pub fn latest_patch_date_label(&self) -> String {
        self.latest_patch_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| ABSENT_DATE_LABEL.to_string())
    }
}

/// Output of one evaluation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Status per server, in manifest order
    pub compliance: IndexMap<String, ComplianceStatus>,
    pub scores: Vec<ScoreRecord>,
    pub breakdown: Vec<BreakdownRecord>,
}

/// Servers grouped by tier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceSummary {
    pub compliant: Vec<String>,
    pub partially_compliant: Vec<String>,
    pub non_compliant: Vec<String>,
}

impl ComplianceSummary {
    pub fn from_status_map(compliance: &IndexMap<String, ComplianceStatus>) -> Self {
        let mut summary = Self::default();
        for (server, status) in compliance {
            let bucket = match status {
                ComplianceStatus::Compliant => &mut summary.compliant,
                ComplianceStatus::PartiallyCompliant => &mut summary.partially_compliant,
                ComplianceStatus::NonCompliant => &mut summary.non_compliant,
            };
            bucket.push(server.clone());
        }
        summary
    }

    pub fn servers(&self, status: ComplianceStatus) -> &[String] {
        match status {
            ComplianceStatus::Compliant => &self.compliant,
            ComplianceStatus::PartiallyCompliant => &self.partially_compliant,
            ComplianceStatus::NonCompliant => &self.non_compliant,
        }
    }

    pub fn count(&self, status: ComplianceStatus) -> usize {
        self.servers(status).len()
    }

    pub fn total(&self) -> usize {
        ComplianceStatus::ALL.iter().map(|s| self.count(*s)).sum()
    }

    /// True if any server sits at `threshold` or a worse tier
    pub fn any_at_or_below(&self, threshold: ComplianceStatus) -> bool {
        ComplianceStatus::ALL
            .iter()
            .filter(|s| **s >= threshold)
            .any(|s| self.count(*s) > 0)
    }
}

/// Caller-supplied export metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub company: Option<String>,
    pub reviewer: Option<String>,
    /// Local time the report was generated (`%Y-%m-%d %H:%M:%S`)
    pub generated_at: String,
}

impl ReportMetadata {
    /// Metadata stamped with the current local time
    pub fn now(company: Option<String>, reviewer: Option<String>) -> Self {
        Self {
            company,
            reviewer,
            generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Everything the reporters need to render a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub policy: String,
    pub compliance: IndexMap<String, ComplianceStatus>,
    pub scores: Vec<ScoreRecord>,
    pub breakdown: Vec<BreakdownRecord>,
    pub summary: ComplianceSummary,
    pub metadata: ReportMetadata,
}

impl ComplianceReport {
    pub fn new(evaluation: Evaluation, policy: impl Into<String>, metadata: ReportMetadata) -> Self {
        let summary = ComplianceSummary::from_status_map(&evaluation.compliance);
        Self {
            policy: policy.into(),
            compliance: evaluation.compliance,
            scores: evaluation.scores,
            breakdown: evaluation.breakdown,
            summary,
            metadata,
        }
    }

    /// Breakdown rows paired with their scores, in manifest order
    pub fn rows(&self) -> impl Iterator<Item = (&BreakdownRecord, u8)> + '_ {
        self.breakdown
            .iter()
            .zip(&self.scores)
            .map(|(row, score)| (row, score.score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_manifest_preserves_order() {
        let manifest: PatchManifest = [("zeta", "p1"), ("alpha", "p2"), ("mid", "p3")]
            .into_iter()
            .collect();
        let servers: Vec<_> = manifest.servers().collect();
        assert_eq!(servers, vec!["zeta", "alpha", "mid"]);
        assert_eq!(manifest.required_patch("alpha"), Some("p2"));
        assert_eq!(manifest.required_patch("missing"), None);
    }

    #[test]
    fn test_latest_patch_date() {
        let a = LogEntry::new("srv01", "p1", date(2024, 3, 1));
        let b = LogEntry::new("srv01", "p2", date(2024, 7, 9));
        assert_eq!(latest_patch_date(&[&a, &b]), Some(date(2024, 7, 9)));
        assert_eq!(latest_patch_date(&[]), None);
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!(
            "non-compliant".parse::<ComplianceStatus>().unwrap(),
            ComplianceStatus::NonCompliant
        );
        assert_eq!(
            "Partially Compliant".parse::<ComplianceStatus>().unwrap(),
            ComplianceStatus::PartiallyCompliant
        );
        assert!("mostly".parse::<ComplianceStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_kebab_case() {
        let json = serde_json::to_string(&ComplianceStatus::PartiallyCompliant).unwrap();
        assert_eq!(json, "\"partially-compliant\"");
    }

    #[test]
    fn test_summary_groups_by_tier() {
        let mut map = IndexMap::new();
        map.insert("a".to_string(), ComplianceStatus::Compliant);
        map.insert("b".to_string(), ComplianceStatus::NonCompliant);
        map.insert("c".to_string(), ComplianceStatus::Compliant);
        let summary = ComplianceSummary::from_status_map(&map);
        assert_eq!(summary.compliant, vec!["a", "c"]);
        assert_eq!(summary.count(ComplianceStatus::PartiallyCompliant), 0);
        assert_eq!(summary.total(), 3);
    }

    #[test]
    fn test_any_at_or_below() {
        let summary = ComplianceSummary {
            compliant: vec!["a".into()],
            partially_compliant: vec!["b".into()],
            non_compliant: vec![],
        };
        assert!(summary.any_at_or_below(ComplianceStatus::PartiallyCompliant));
        assert!(!summary.any_at_or_below(ComplianceStatus::NonCompliant));
    }

    #[test]
    fn test_absent_date_label() {
        let record = BreakdownRecord {
            server: "srv03".into(),
            required_patch: "patch3".into(),
            status: ComplianceStatus::NonCompliant,
            latest_patch_date: None,
        };
        assert_eq!(record.latest_patch_date_label(), "N/A");
    }
}
