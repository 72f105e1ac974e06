//! Input loaders
//!
//! - `manifest` - YAML patch manifest (server: required_patch)
//! - `logs` - CSV patch log (server, patch, timestamp)
//!
//! Both hand back plain values for the evaluator. Anything malformed is
//! rejected here so the evaluator never has to re-validate.

mod logs;
mod manifest;

pub use logs::{parse_log_file, parse_logs, REQUIRED_COLUMNS, TIMESTAMP_FORMAT};
pub use manifest::{load_patch_manifest, parse_manifest};

use thiserror::Error;

/// Broad category of an input error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The document or a value in it could not be parsed
    Parse,
    /// The document parsed but does not have the required shape
    Validation,
    Io,
}

/// Errors that can occur while loading inputs
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Invalid patch manifest: {0}")]
    InvalidManifest(String),

    #[error("Invalid timestamp '{value}' on line {line}: expected format {format}")]
    InvalidTimestamp {
        value: String,
        line: usize,
        format: &'static str,
    },

    #[error("Malformed log row on line {line}: {message}")]
    MalformedRow { line: usize, message: String },

    #[error("Missing required columns: {missing:?}. Found: {found:?}")]
    MissingColumns {
        missing: Vec<String>,
        found: Vec<String>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl InputError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            InputError::InvalidManifest(_)
            | InputError::InvalidTimestamp { .. }
            | InputError::MalformedRow { .. } => ErrorKind::Parse,
            InputError::MissingColumns { .. } => ErrorKind::Validation,
            InputError::Io(_) => ErrorKind::Io,
        }
    }
}

pub type InputResult<T> = Result<T, InputError>;
