//! Patch Compliance Scoring
//!
//! Turns the log evidence for one server into a 0-100 score, and the
//! score into a compliance tier.
//!
//! # Policies
//!
//! ```text
//! Binary:
//!   score = 100 if the required patch was applied, else 0
//!
//! Graduated (default):
//!   required patch applied:
//!     score = 60 + recency_bonus + activity_bonus   (capped at 100)
//!   other patches only:
//!     score = partial_credit(count)
//!   no patches:
//!     score = 0
//! ```
//!
//! # Graduated Bonuses
//!
//! - **Recency** (days from the anchor, default 2024-01-01, to the latest
//!   log entry): >150 → +25, >90 → +15, otherwise +5
//! - **Activity** (log entries for the server): ≥3 → +15, 2 → +10, 1 → +5
//! - **Partial credit** (required patch missing): ≥3 → 30, 2 → 20, 1 → 10
//!
//! # Tiers
//!
//! - Compliant: score ≥ 80
//! - Partially Compliant: 40 ≤ score < 80
//! - Non-Compliant: score < 40
//!
//! Partial credit never reaches the Partially Compliant floor, so a server
//! missing its required patch is always Non-Compliant.

mod classifier;
mod policy;

pub use classifier::{classify, COMPLIANT_THRESHOLD, PARTIALLY_COMPLIANT_THRESHOLD};
pub use policy::{default_recency_anchor, PolicyKind, ScoringPolicy, MAX_SCORE};
