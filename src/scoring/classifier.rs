//! Score to tier mapping

use crate::models::ComplianceStatus;

/// Minimum score for Compliant
pub const COMPLIANT_THRESHOLD: u8 = 80;
/// Minimum score for Partially Compliant
pub const PARTIALLY_COMPLIANT_THRESHOLD: u8 = 40;

/// Classify a score. Depends on the score alone.
pub fn classify(score: u8) -> ComplianceStatus {
    match score {
        s if s >= COMPLIANT_THRESHOLD => ComplianceStatus::Compliant,
        s if s >= PARTIALLY_COMPLIANT_THRESHOLD => ComplianceStatus::PartiallyCompliant,
        _ => ComplianceStatus::NonCompliant,
    }
}
