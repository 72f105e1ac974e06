//! Configuration module for SecuPatch
//!
//! This module handles:
//! - Project-level configuration (secupatch.toml)
//! - Scoring policy selection
//! - Report metadata and CLI defaults

mod project_config;

pub use project_config::{
    CliDefaults,
    ProjectConfig,
    ReportConfig,
    ScoringConfig,
    CONFIG_FILE_NAMES,
    load_config_file,
    load_project_config,
};
