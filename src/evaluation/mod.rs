//! Compliance evaluation
//!
//! Walks the manifest in order and, for every server, looks up its log
//! entries, scores them, classifies the score and records the latest patch
//! date. Servers that only appear in the log are ignored.
//!
//! The evaluation is pure: it owns no state between calls, so independent
//! manifest/log pairs can be evaluated on as many threads as needed.

mod log_index;

pub use log_index::LogIndex;

use crate::models::{
    latest_patch_date, BreakdownRecord, Evaluation, LogEntry, PatchManifest, ScoreRecord,
};
use crate::scoring::{classify, ScoringPolicy};
use tracing::{debug, info};

/// Evaluate every manifest server against the log.
///
/// Produces exactly one score record and one breakdown record per manifest
/// entry, in manifest order.
pub fn evaluate(manifest: &PatchManifest, logs: &[LogEntry], policy: &ScoringPolicy) -> Evaluation {
    let index = LogIndex::build(logs);

    let unmanaged = index
        .servers()
        .filter(|s| manifest.required_patch(s).is_none())
        .count();
    debug!(
        "Indexed {} log entries across {} server(s)",
        logs.len(),
        index.server_count()
    );
    if unmanaged > 0 {
        debug!("{} server(s) in the log are not in the manifest and will be ignored", unmanaged);
    }

    let mut evaluation = Evaluation::default();
    for (server, required_patch) in manifest.iter() {
        let matching = index.matching(server);
        let score = policy.score(required_patch, matching);
        let status = classify(score);
        let latest = latest_patch_date(matching);

        debug!(
            server,
            required_patch,
            entries = matching.len(),
            score,
            status = %status,
            "Scored server"
        );

        evaluation.compliance.insert(server.to_string(), status);
        evaluation.scores.push(ScoreRecord {
            server: server.to_string(),
            score,
        });
        evaluation.breakdown.push(BreakdownRecord {
            server: server.to_string(),
            required_patch: required_patch.to_string(),
            status,
            latest_patch_date: latest,
        });
    }

    info!(
        "Evaluated {} server(s) against {} log entries using the {} policy",
        manifest.len(),
        logs.len(),
        policy.kind()
    );
    evaluation
}
