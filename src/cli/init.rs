//! Init command - write a starter config file

use anyhow::{Context, Result};
use console::style;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# SecuPatch Configuration

[scoring]
# Scoring policy: "graduated" (base + recency + activity) or "binary" (applied or not)
policy = "graduated"

# Day the graduated policy's recency bonus counts from (quoted or bare date)
recency_anchor = "2024-01-01"

[report]
# Stamped on exported reports
# company = "Acme Corp"
# reviewer = "Jane Doe"

[defaults]
# Default output format (text, json, markdown, csv)
format = "text"

# Exit with code 1 when a server is at this tier or worse (CI mode)
# fail_on = "non-compliant"
"#;

/// Run the init command
pub fn run(path: &Path) -> Result<()> {
    if !path.is_dir() {
        anyhow::bail!("Path is not a directory: {}", path.display());
    }

    let config_path = path.join("secupatch.toml");
    if config_path.exists() {
        println!(
            "{} Config already exists at {}",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
        return Ok(());
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to create {}", config_path.display()))?;
    println!(
        "{} Created {}",
        style("✓").green(),
        style(config_path.display()).cyan()
    );
    Ok(())
}
