//! Scoring policies
//!
//! Both policies share one entry point, [`ScoringPolicy::score`], so the
//! evaluator never branches on which one is active.

use crate::models::{latest_patch_date, LogEntry};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Upper bound for any score
pub const MAX_SCORE: u8 = 100;

const BASE_SCORE: u8 = 60; // required patch present

const RECENCY_RECENT_DAYS: i64 = 150;
const RECENCY_MODERATE_DAYS: i64 = 90;
const RECENCY_RECENT_BONUS: u8 = 25;
const RECENCY_MODERATE_BONUS: u8 = 15;
const RECENCY_STALE_BONUS: u8 = 5;

const ACTIVITY_HIGH_BONUS: u8 = 15; // 3+ entries
const ACTIVITY_MEDIUM_BONUS: u8 = 10; // 2 entries
const ACTIVITY_LOW_BONUS: u8 = 5;

const PARTIAL_HIGH: u8 = 30; // 3+ entries
const PARTIAL_MEDIUM: u8 = 20; // 2 entries
const PARTIAL_LOW: u8 = 10;

/// Default anchor the recency bonus counts days from (2024-01-01)
pub fn default_recency_anchor() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Policy selector as it appears in config files and on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    Binary,
    #[default]
    Graduated,
}

impl PolicyKind {
    /// Build the policy. The anchor only matters for `Graduated`.
    pub fn into_policy(self, recency_anchor: NaiveDate) -> ScoringPolicy {
        match self {
            PolicyKind::Binary => ScoringPolicy::Binary,
            PolicyKind::Graduated => ScoringPolicy::Graduated { recency_anchor },
        }
    }
}

impl FromStr for PolicyKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "binary" => Ok(PolicyKind::Binary),
            "graduated" => Ok(PolicyKind::Graduated),
            _ => Err(anyhow::anyhow!(
                "Unknown scoring policy '{}'. Valid policies: binary, graduated",
                s
            )),
        }
    }
}

impl std::fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyKind::Binary => write!(f, "binary"),
            PolicyKind::Graduated => write!(f, "graduated"),
        }
    }
}

/// Rule set converting a server's log evidence into a score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringPolicy {
    /// 100 if the required patch was applied, else 0
    Binary,
    /// Base score plus recency and activity bonuses, with partial credit
    Graduated { recency_anchor: NaiveDate },
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        ScoringPolicy::graduated()
    }
}

impl ScoringPolicy {
    /// Graduated policy anchored at 2024-01-01
    pub fn graduated() -> Self {
        ScoringPolicy::Graduated {
            recency_anchor: default_recency_anchor(),
        }
    }

    pub fn kind(&self) -> PolicyKind {
        match self {
            ScoringPolicy::Binary => PolicyKind::Binary,
            ScoringPolicy::Graduated { .. } => PolicyKind::Graduated,
        }
    }

    /// Score one server given its required patch and all of its log entries.
    /// Always within 0..=100.
    pub fn score(&self, required_patch: &str, logs: &[&LogEntry]) -> u8 {
        let has_required = logs.iter().any(|log| log.patch == required_patch);
        match self {
            ScoringPolicy::Binary => {
                if has_required {
                    MAX_SCORE
                } else {
                    0
                }
            }
            ScoringPolicy::Graduated { recency_anchor } => {
                graduated_score(has_required, logs, *recency_anchor)
            }
        }
    }
}

fn graduated_score(has_required: bool, logs: &[&LogEntry], anchor: NaiveDate) -> u8 {
    let Some(latest) = latest_patch_date(logs) else {
        return 0;
    };
    let count = logs.len();

    if !has_required {
        return partial_credit(count);
    }

    let score = BASE_SCORE + recency_bonus(latest, anchor) + activity_bonus(count);
    score.min(MAX_SCORE)
}

/// Days before the anchor count as negative and earn the stale bonus.
fn recency_bonus(latest: NaiveDate, anchor: NaiveDate) -> u8 {
    let days = (latest - anchor).num_days();
    if days > RECENCY_RECENT_DAYS {
        RECENCY_RECENT_BONUS
    } else if days > RECENCY_MODERATE_DAYS {
        RECENCY_MODERATE_BONUS
    } else {
        RECENCY_STALE_BONUS
    }
}

fn activity_bonus(count: usize) -> u8 {
    match count {
        n if n >= 3 => ACTIVITY_HIGH_BONUS,
        2 => ACTIVITY_MEDIUM_BONUS,
        _ => ACTIVITY_LOW_BONUS,
    }
}

fn partial_credit(count: usize) -> u8 {
    match count {
        n if n >= 3 => PARTIAL_HIGH,
        2 => PARTIAL_MEDIUM,
        _ => PARTIAL_LOW,
    }
}
