//! CSV patch log loader
//!
//! ```text
//! server,patch,timestamp
//! srv01,KB5034441,2024-05-01
//! ```
//!
//! Column order is free and extra columns are ignored. Quoted fields
//! (with `""` escapes) are supported; fields spanning lines are not.

use super::{InputError, InputResult};
use crate::models::LogEntry;
use chrono::NaiveDate;
use std::path::Path;
use tracing::debug;

/// Columns every log must have
pub const REQUIRED_COLUMNS: [&str; 3] = ["server", "patch", "timestamp"];

/// Expected timestamp format
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d";

/// Load patch log entries from a CSV file
pub fn parse_log_file(path: &Path) -> InputResult<Vec<LogEntry>> {
    let content = std::fs::read_to_string(path)?;
    let logs = parse_logs(&content)?;
    debug!("Loaded {} log entries from {}", logs.len(), path.display());
    Ok(logs)
}

/// Parse CSV text into log entries
pub fn parse_logs(content: &str) -> InputResult<Vec<LogEntry>> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(_, line)| !line.trim().is_empty());

    let Some((header_no, header_line)) = lines.next() else {
        return Err(InputError::MissingColumns {
            missing: REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
            found: Vec::new(),
        });
    };

    let header: Vec<String> = split_record(header_line.trim_start_matches('\u{feff}'), header_no)?
        .into_iter()
        .map(|c| c.trim().to_string())
        .collect();

    let find = |name: &str| header.iter().position(|h| h == name);
    let (Some(server_col), Some(patch_col), Some(timestamp_col)) =
        (find("server"), find("patch"), find("timestamp"))
    else {
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|c| find(**c).is_none())
            .map(|c| c.to_string())
            .collect();
        return Err(InputError::MissingColumns {
            missing,
            found: header,
        });
    };

    let mut logs = Vec::new();
    for (line_no, line) in lines {
        let fields = split_record(line, line_no)?;
        if fields.len() != header.len() {
            return Err(InputError::MalformedRow {
                line: line_no,
                message: format!("expected {} fields, found {}", header.len(), fields.len()),
            });
        }

        let server = fields[server_col].trim();
        let patch = fields[patch_col].trim();
        if server.is_empty() || patch.is_empty() {
            return Err(InputError::MalformedRow {
                line: line_no,
                message: "server and patch must not be empty".to_string(),
            });
        }

        let raw_timestamp = fields[timestamp_col].trim();
        let timestamp = NaiveDate::parse_from_str(raw_timestamp, TIMESTAMP_FORMAT).map_err(|_| {
            InputError::InvalidTimestamp {
                value: raw_timestamp.to_string(),
                line: line_no,
                format: TIMESTAMP_FORMAT,
            }
        })?;

        logs.push(LogEntry::new(server, patch, timestamp));
    }

    Ok(logs)
}

/// Split one CSV record into fields
fn split_record(line: &str, line_no: usize) -> InputResult<Vec<String>> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.trim().is_empty() => {
                field.clear();
                in_quotes = true;
            }
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(InputError::MalformedRow {
            line: line_no,
            message: "unterminated quoted field".to_string(),
        });
    }
    fields.push(field);
    Ok(fields)
}
