//! Binary tests for the `risklab` command.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

// =============================================================================
// FIXTURES
// =============================================================================

fn write_holdings(dir: &Path) -> PathBuf {
    let path = dir.join("holdings.csv");
    fs::write(
        &path,
        "Ticker,Allocation,AssetType\nAAPL,40,Equity\nGOOGL,35,Equity\nTSLA,25,\n",
    )
    .unwrap();
    path
}

fn risklab(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("risklab").unwrap();
    cmd.env_remove("RISKLAB_CONFIG")
        .env("RUST_LOG", "off")
        .arg("--portfolio")
        .arg(write_holdings(dir));
    cmd
}

fn json_output(cmd: &mut Command) -> Value {
    let output = cmd.arg("--format").arg("json").output().unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

// =============================================================================
// COMMANDS
// =============================================================================

#[test]
fn test_metrics_table() {
    let dir = TempDir::new().unwrap();
    risklab(dir.path())
        .arg("metrics")
        .assert()
        .success()
        .stdout(predicate::str::contains("VaR_95"))
        .stdout(predicate::str::contains("Sharpe"));
}

#[test]
fn test_metrics_json_confidence() {
    let dir = TempDir::new().unwrap();
    let json = json_output(risklab(dir.path()).args(["metrics", "--confidence", "0.99"]));

    assert_eq!(json["title"], "RiskMetrics");
    let columns: Vec<&str> = json["columns"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c.as_str().unwrap())
        .collect();
    assert_eq!(columns, vec!["Volatility", "VaR_99", "CVaR_99", "Sharpe"]);
}

#[test]
fn test_stress_csv() {
    let dir = TempDir::new().unwrap();
    let output = risklab(dir.path())
        .args(["--format", "csv", "stress"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let labels: Vec<&str> = stdout
        .lines()
        .map(|l| l.split(',').next().unwrap())
        .collect();
    assert_eq!(
        labels,
        vec!["Scenario", "Base", "Market Crash", "Tech Dip", "Bond Rally"]
    );
}

#[test]
fn test_stress_unknown_scenario() {
    let dir = TempDir::new().unwrap();
    risklab(dir.path())
        .args(["stress", "--scenario", "Meteor"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown scenario: Meteor"));
}

#[test]
fn test_liquidity_crunch() {
    let dir = TempDir::new().unwrap();
    let json = json_output(risklab(dir.path()).args([
        "liquidity",
        "--score",
        "AAPL=0.9",
        "--score",
        "GOOGL=0.8",
        "--score",
        "TSLA=0.7",
        "--shock",
        "Equity=-0.5",
        "--name",
        "Crunch",
    ]));

    assert_eq!(json["rows"][0]["label"], "Crunch");
    let value = json["rows"][0]["cells"][0].as_f64().unwrap();
    assert!((value - 0.495).abs() < 1e-9, "{value}");
}

#[test]
fn test_liquidity_base_row_without_scenarios() {
    let dir = TempDir::new().unwrap();
    let json = json_output(risklab(dir.path()).args([
        "liquidity",
        "--score",
        "AAPL=0.9",
        "--score",
        "GOOGL=0.8",
        "--score",
        "TSLA=0.7",
    ]));

    assert_eq!(json["rows"].as_array().unwrap().len(), 1);
    assert_eq!(json["rows"][0]["label"], "Base");
    let value = json["rows"][0]["cells"][0].as_f64().unwrap();
    assert!((value - 0.815).abs() < 1e-9, "{value}");
}

#[test]
fn test_liquidity_bad_assignment() {
    let dir = TempDir::new().unwrap();
    risklab(dir.path())
        .args(["liquidity", "--score", "AAPL"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid assignment"));
}

#[test]
fn test_matrix_explicit_impact() {
    let dir = TempDir::new().unwrap();
    let json = json_output(risklab(dir.path()).args(["matrix", "--impact", "0.05"]));

    let rows = json["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    for row in rows {
        for cell in row["cells"].as_array().unwrap() {
            assert!((cell.as_f64().unwrap() - 0.005).abs() < 1e-12);
        }
    }
}

#[test]
fn test_plugins() {
    let dir = TempDir::new().unwrap();
    let json = json_output(risklab(dir.path()).args(["plugins", "--top", "2"]));

    assert_eq!(json["weights"].as_array().unwrap().len(), 3);
    assert_eq!(json["top_risky"].as_array().unwrap().len(), 2);
}

// =============================================================================
// SESSION AND REPORT
// =============================================================================

#[test]
fn test_report_from_session_file() {
    let dir = TempDir::new().unwrap();
    let holdings = write_holdings(dir.path());
    let out = dir.path().join("reports");
    let session = dir.path().join("session.toml");
    fs::write(
        &session,
        format!(
            r#"
portfolio_file = "{}"

[synthetic]
seed = 7
periods = 120

[[scenarios]]
name = "Selloff"
shocks = {{ Equity = -0.2 }}

[liquidity.scores]
AAPL = 0.9

[[liquidity.scenarios]]
name = "Liquidity Crunch"
shocks = {{ Equity = -0.2, Bond = -0.05 }}

[report]
output_dir = "{}"
filename = "RiskLab_Report.xlsx"
"#,
            holdings.display(),
            out.display()
        ),
    )
    .unwrap();

    Command::cargo_bin("risklab")
        .unwrap()
        .env("RUST_LOG", "off")
        .arg("--config")
        .arg(&session)
        .args(["report", "--export"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Selloff"))
        .stdout(predicate::str::contains("Liquidity Crunch"));

    for section in ["Portfolio", "RiskMetrics", "StressTest", "Liquidity", "RiskMatrix"] {
        assert!(out.join(format!("RiskLab_Report_{section}.csv")).exists());
    }
}

#[test]
fn test_report_json_sections() {
    let dir = TempDir::new().unwrap();
    let json = json_output(risklab(dir.path()).arg("report"));

    let titles: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["title"].as_str().unwrap())
        .collect();
    assert_eq!(
        titles,
        vec!["Portfolio", "RiskMetrics", "StressTest", "Liquidity", "RiskMatrix"]
    );
}

#[test]
fn test_missing_portfolio() {
    Command::cargo_bin("risklab")
        .unwrap()
        .env_remove("RISKLAB_CONFIG")
        .arg("metrics")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing required argument"));
}
