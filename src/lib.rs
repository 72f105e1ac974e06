//! SecuPatch - server patch compliance evaluation
//!
//! Given a manifest of the patch each server must have and a log of the
//! patches actually applied, computes a 0-100 score, a compliance tier and
//! a detail breakdown per server.
//!
//! ```
//! use chrono::NaiveDate;
//! use secupatch::evaluation::evaluate;
//! use secupatch::models::{ComplianceStatus, LogEntry, PatchManifest};
//! use secupatch::scoring::ScoringPolicy;
//!
//! let manifest: PatchManifest = [("srv01", "patch1"), ("srv02", "patch2")].into_iter().collect();
//! let logs = vec![LogEntry::new("srv01", "patch1", NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())];
//!
//! let result = evaluate(&manifest, &logs, &ScoringPolicy::graduated());
//! assert_eq!(result.compliance["srv01"], ComplianceStatus::Compliant);
//! assert_eq!(result.compliance["srv02"], ComplianceStatus::NonCompliant);
//! ```

pub mod config;
pub mod evaluation;
pub mod models;
pub mod parsers;
pub mod reporters;
pub mod scoring;
