//! YAML patch manifest loader
//!
//! ```yaml
//! srv01: KB5034441
//! srv02: KB5034122
//! ```

use super::{InputError, InputResult};
use crate::models::PatchManifest;
use serde_yaml::Value;
use std::path::Path;
use tracing::debug;

/// Load a patch manifest from a YAML file
pub fn load_patch_manifest(path: &Path) -> InputResult<PatchManifest> {
    let content = std::fs::read_to_string(path)?;
    let manifest = parse_manifest(&content)?;
    debug!("Loaded {} manifest entries from {}", manifest.len(), path.display());
    Ok(manifest)
}

/// Parse a manifest document.
///
/// Scalar keys and values (strings, numbers, booleans) are accepted and kept
/// as written, so `3.10` stays `"3.10"` and `0x1F` stays `"0x1F"`. An empty
/// document is an empty manifest.
pub fn parse_manifest(content: &str) -> InputResult<PatchManifest> {
    if content.trim().is_empty() {
        return Ok(PatchManifest::new());
    }

    let doc: Value =
        serde_yaml::from_str(content).map_err(|e| InputError::InvalidManifest(e.to_string()))?;

    let mapping = match doc {
        Value::Null => return Ok(PatchManifest::new()),
        Value::Mapping(mapping) => mapping,
        other => {
            return Err(InputError::InvalidManifest(format!(
                "expected a mapping of server to required patch, found {}",
                describe(&other)
            )))
        }
    };

    for (key, value) in &mapping {
        if !is_plain_scalar(key) {
            return Err(InputError::InvalidManifest(format!(
                "server names must be plain values, found {}",
                describe(key)
            )));
        }
        if !is_plain_scalar(value) {
            return Err(InputError::InvalidManifest(format!(
                "required patch for '{}' must be a plain value, found {}",
                key.as_str().map(str::to_string).unwrap_or_else(|| describe(key).to_string()),
                describe(value)
            )));
        }
    }

    // Deserializing into strings keeps the scalar text as written; going
    // through `Value` would normalize numbers.
    serde_yaml::from_str(content).map_err(|e| InputError::InvalidManifest(e.to_string()))
}

fn is_plain_scalar(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_))
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "an empty value",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a nested mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::ErrorKind;

    #[test]
    fn test_parse_simple_manifest() {
        let manifest = parse_manifest("srv01: patch1\nsrv02: patch2").unwrap();
        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.required_patch("srv01"), Some("patch1"));
        assert_eq!(manifest.required_patch("srv02"), Some("patch2"));
    }

    #[test]
    fn test_parse_preserves_document_order() {
        let manifest = parse_manifest("web02: a\ndb01: b\napp07: c\n").unwrap();
        let servers: Vec<_> = manifest.servers().collect();
        assert_eq!(servers, vec!["web02", "db01", "app07"]);
    }

    #[test]
    fn test_numeric_values_are_stringified() {
        let manifest = parse_manifest("srv01: 5034441\n").unwrap();
        assert_eq!(manifest.required_patch("srv01"), Some("5034441"));
    }

    #[test]
    fn test_numeric_values_keep_their_text() {
        let manifest = parse_manifest("srv01: 3.10\nsrv02: 007\nsrv03: 0x1F\n1.50: true\n").unwrap();
        assert_eq!(manifest.required_patch("srv01"), Some("3.10"));
        assert_eq!(manifest.required_patch("srv02"), Some("007"));
        assert_eq!(manifest.required_patch("srv03"), Some("0x1F"));
        assert_eq!(manifest.required_patch("1.50"), Some("true"));
    }

    #[test]
    fn test_empty_document_is_empty_manifest() {
        assert!(parse_manifest("").unwrap().is_empty());
        assert!(parse_manifest("   \n").unwrap().is_empty());
        assert!(parse_manifest("~").unwrap().is_empty());
    }

    #[test]
    fn test_rejects_non_mapping() {
        let err = parse_manifest("- srv01\n- srv02\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.to_string().contains("a list"));
    }

    #[test]
    fn test_rejects_nested_values() {
        let err = parse_manifest("srv01:\n  patch: p1\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.to_string().contains("srv01"));
    }

    #[test]
    fn test_rejects_missing_value() {
        let err = parse_manifest("srv01:\n").unwrap_err();
        assert!(err.to_string().contains("an empty value"));
    }

    #[test]
    fn test_rejects_invalid_yaml() {
        let err = parse_manifest("srv01: [unterminated").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }
}
