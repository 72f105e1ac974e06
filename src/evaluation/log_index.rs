//! Server → log entries lookup, built once per run

use crate::models::LogEntry;
use std::collections::HashMap;

/// Log entries grouped by server. Duplicates are kept, input order is kept
/// within each server.
#[derive(Debug, Default)]
pub struct LogIndex<'a> {
    by_server: HashMap<&'a str, Vec<&'a LogEntry>>,
}

impl<'a> LogIndex<'a> {
    pub fn build(logs: &'a [LogEntry]) -> Self {
        let mut by_server: HashMap<&'a str, Vec<&'a LogEntry>> = HashMap::new();
        for entry in logs {
            by_server.entry(entry.server.as_str()).or_default().push(entry);
        }
        Self { by_server }
    }

    /// Entries for a server; empty when the server never appears in the log
    pub fn matching(&self, server: &str) -> &[&'a LogEntry] {
        self.by_server.get(server).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct servers seen in the log
    pub fn server_count(&self) -> usize {
        self.by_server.len()
    }

    pub fn servers(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.by_server.keys().copied()
    }
}
