//! CLI contract tests
//!
//! Runs the secupatch binary against manifest/log files in isolated temp
//! directories and checks output formats, policies, config pickup, error
//! messages and exit codes.

use std::path::Path;
use std::process::Command;

fn secupatch_bin() -> String {
    env!("CARGO_BIN_EXE_secupatch").to_string()
}

const MANIFEST: &str = "srv01: patch1\nsrv02: patch2\nsrv03: patch3\n";
const LOGS: &str = "server,patch,timestamp\n\
srv01,patch1,2024-05-01\n\
srv02,patch2,2024-05-02\n\
rogue,patchX,2024-06-01\n";

fn setup_workspace(manifest: &str, logs: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("manifest.yaml"), manifest).unwrap();
    std::fs::write(dir.path().join("logs.csv"), logs).unwrap();
    dir
}

/// Run `secupatch check manifest.yaml logs.csv <args>` inside `dir`
fn run_check(dir: &Path, extra_args: &[&str]) -> (i32, String, String) {
    let mut cmd = Command::new(secupatch_bin());
    cmd.current_dir(dir)
        .env_remove("SECUPATCH_CONFIG")
        .env_remove("RUST_LOG")
        .arg("check")
        .arg("manifest.yaml")
        .arg("logs.csv");
    for arg in extra_args {
        cmd.arg(arg);
    }
    let output = cmd.output().expect("Failed to run secupatch");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (output.status.code().unwrap_or(-1), stdout, stderr)
}

fn parse_json(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout).unwrap_or_else(|e| panic!("Invalid JSON ({e}): {stdout}"))
}

// ============================================================================
// Output formats
// ============================================================================

#[test]
fn test_text_output_has_summary() {
    let dir = setup_workspace(MANIFEST, LOGS);
    let (code, stdout, stderr) = run_check(dir.path(), &[]);
    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stdout.contains("--- COMPLIANCE SUMMARY ---"));
    assert!(stdout.contains("Compliant Servers (2): [\"srv01\", \"srv02\"]"));
    assert!(stdout.contains("Non-Compliant Servers (1): [\"srv03\"]"));
    assert!(!stdout.contains("rogue"));
}

#[test]
fn test_json_output_graduated() {
    let dir = setup_workspace(MANIFEST, LOGS);
    let (code, stdout, stderr) = run_check(dir.path(), &["--format", "json"]);
    assert_eq!(code, 0, "stderr: {stderr}");

    let report = parse_json(&stdout);
    assert_eq!(report["policy"], "graduated");
    assert_eq!(report["compliance"]["srv01"], "compliant");
    assert_eq!(report["compliance"]["srv03"], "non-compliant");
    assert_eq!(report["scores"][0]["score"], 80);
    assert_eq!(report["scores"][2]["score"], 0);
    assert_eq!(report["breakdown"][0]["latest_patch_date"], "2024-05-01");
    assert!(report["breakdown"][2]["latest_patch_date"].is_null());
    assert!(report["compliance"].get("rogue").is_none());
}

#[test]
fn test_binary_policy_flag() {
    let dir = setup_workspace(MANIFEST, LOGS);
    let (code, stdout, _) = run_check(dir.path(), &["--policy", "binary", "-f", "json"]);
    assert_eq!(code, 0);

    let report = parse_json(&stdout);
    assert_eq!(report["policy"], "binary");
    let scores: Vec<u64> = report["scores"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["score"].as_u64().unwrap())
        .collect();
    assert_eq!(scores, vec![100, 100, 0]);
}

#[test]
fn test_anchor_flag_changes_recency() {
    let dir = setup_workspace(MANIFEST, LOGS);
    // 2024-05-01 is 152 days after 2023-12-01 → recent bonus
    let (code, stdout, _) = run_check(dir.path(), &["--anchor", "2023-12-01", "-f", "json"]);
    assert_eq!(code, 0);
    let report = parse_json(&stdout);
    assert_eq!(report["scores"][0]["score"], 90);
}

#[test]
fn test_csv_export_to_directory() {
    let dir = setup_workspace(MANIFEST, LOGS);
    let out_dir = dir.path().join("reports");
    std::fs::create_dir(&out_dir).unwrap();

    let (code, _, stderr) = run_check(
        dir.path(),
        &[
            "--format",
            "csv",
            "--output",
            "reports",
            "--company",
            "Acme",
            "--reviewer",
            "Jane",
        ],
    );
    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stderr.contains("Report written to"));

    let csv = std::fs::read_to_string(out_dir.join("secupatch_compliance_report.csv")).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines[0],
        "server,required_patch,status,latest_patch_date,company,reviewer,report_generated"
    );
    assert!(lines[1].starts_with("srv01,patch1,Compliant,2024-05-01,Acme,Jane,"));
    assert!(lines[3].starts_with("srv03,patch3,Non-Compliant,N/A,Acme,Jane,"));
}

#[test]
fn test_markdown_output_file() {
    let dir = setup_workspace(MANIFEST, LOGS);
    let (code, _, _) = run_check(dir.path(), &["-f", "md", "-o", "report.md"]);
    assert_eq!(code, 0);
    let md = std::fs::read_to_string(dir.path().join("report.md")).unwrap();
    assert!(md.contains("## Summary"));
    assert!(md.contains("`srv02`"));
}

// ============================================================================
// --fail-on
// ============================================================================

#[test]
fn test_fail_on_non_compliant() {
    let dir = setup_workspace(MANIFEST, LOGS);
    let (code, _, stderr) = run_check(dir.path(), &["--fail-on", "non-compliant"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("--fail-on=non-compliant"));
}

#[test]
fn test_fail_on_passes_when_all_compliant() {
    let dir = setup_workspace("srv01: patch1\n", LOGS);
    let (code, _, _) = run_check(dir.path(), &["--fail-on", "partially-compliant"]);
    assert_eq!(code, 0);
}

// ============================================================================
// Config
// ============================================================================

#[test]
fn test_config_file_sets_policy_and_metadata() {
    let dir = setup_workspace(MANIFEST, LOGS);
    std::fs::write(
        dir.path().join("secupatch.toml"),
        "[scoring]\npolicy = \"binary\"\n\n[report]\ncompany = \"Initech\"\n\n[defaults]\nformat = \"json\"\n",
    )
    .unwrap();

    let (code, stdout, _) = run_check(dir.path(), &[]);
    assert_eq!(code, 0);
    let report = parse_json(&stdout);
    assert_eq!(report["policy"], "binary");
    assert_eq!(report["metadata"]["company"], "Initech");

    // Flags override the config file
    let (_, stdout, _) = run_check(dir.path(), &["--policy", "graduated"]);
    assert_eq!(parse_json(&stdout)["policy"], "graduated");
}

#[test]
fn test_explicit_missing_config_fails() {
    let dir = setup_workspace(MANIFEST, LOGS);
    let (code, _, stderr) = run_check(dir.path(), &["--config", "nope.toml"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("nope.toml"));
}

#[test]
fn test_init_writes_config() {
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(secupatch_bin())
        .current_dir(dir.path())
        .arg("init")
        .output()
        .expect("Failed to run secupatch");
    assert!(output.status.success());
    let content = std::fs::read_to_string(dir.path().join("secupatch.toml")).unwrap();
    assert!(content.contains("policy = \"graduated\""));
}

// ============================================================================
// Input errors
// ============================================================================

#[test]
fn test_missing_columns_reported() {
    let dir = setup_workspace(MANIFEST, "host,patch,date\nsrv01,patch1,2024-05-01\n");
    let (code, stdout, stderr) = run_check(dir.path(), &[]);
    assert_ne!(code, 0);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Missing required columns"), "stderr: {stderr}");
    assert!(stderr.contains("host"));
}

#[test]
fn test_bad_timestamp_reported() {
    let dir = setup_workspace(MANIFEST, "server,patch,timestamp\nsrv01,patch1,May 1 2024\n");
    let (code, _, stderr) = run_check(dir.path(), &[]);
    assert_ne!(code, 0);
    assert!(stderr.contains("May 1 2024"), "stderr: {stderr}");
}

#[test]
fn test_bad_manifest_reported() {
    let dir = setup_workspace("- srv01\n- srv02\n", LOGS);
    let (code, _, stderr) = run_check(dir.path(), &[]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Invalid patch manifest"), "stderr: {stderr}");
}

#[test]
fn test_missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_check(dir.path(), &[]);
    assert_ne!(code, 0);
    assert!(stderr.contains("manifest.yaml"));
}
