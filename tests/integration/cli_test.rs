use std::fs;
use std::process::{Command, Output};

use anyhow::Result;
use serde_json::Value;

// Declare the common module for test utilities using a path attribute
#[path = "../common/mod.rs"]
mod common;
use common::{write_data_file, HOUSES_CSV};

fn csvq(args: &[&str]) -> Result<Output> {
    Ok(Command::new(env!("CARGO_BIN_EXE_csvq")).args(args).output()?)
}

#[test]
fn test_query_prints_table() -> Result<()> {
    let (dir, _path) = write_data_file("houses.csv", HOUSES_CSV)?;
    let data_dir = dir.path().to_string_lossy().to_string();

    let output = csvq(&[
        "--data-dir",
        &data_dir,
        "query",
        "FROM \"houses.csv\" SELECT KOTA, LT WHERE LT < 500",
    ])?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "| KOTA            | LT  |");
    assert_eq!(lines[2], "| Jakarta Selatan | 450 |");
    assert_eq!(lines[3], "| Depok           | 300 |");
    assert_eq!(lines[4], "(2 rows)");
    Ok(())
}

#[test]
fn test_query_prints_json() -> Result<()> {
    let (dir, _path) = write_data_file("houses.csv", HOUSES_CSV)?;
    let data_dir = dir.path().to_string_lossy().to_string();

    let output = csvq(&[
        "--data-dir",
        &data_dir,
        "--format",
        "json",
        "query",
        "FROM \"houses.csv\" SELECT HARGA ORDER BY HARGA DESC LIMIT 2",
    ])?;
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["columns"], serde_json::json!(["HARGA"]));
    assert_eq!(json["rows"], serde_json::json!([["n/a"], ["28,000,000,000"]]));
    Ok(())
}

#[test]
fn test_run_reads_query_file() -> Result<()> {
    let (dir, data_path) = write_data_file("houses.csv", HOUSES_CSV)?;
    let query_path = dir.path().join("cheap.q");
    fs::write(
        &query_path,
        format!(
            "FROM \"{}\"\nSELECT KOTA\nWHERE LT <= 600\nORDER BY KOTA\n",
            data_path.display()
        ),
    )?;

    let output = csvq(&["--format", "json", "run", &query_path.to_string_lossy()])?;
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(
        json["rows"],
        serde_json::json!([["Depok"], ["Depok"], ["Jakarta Selatan"]])
    );
    Ok(())
}

#[test]
fn test_parse_prints_ast_without_data() -> Result<()> {
    let output = csvq(&[
        "--format",
        "json",
        "parse",
        "FROM \"never-read.csv\" SELECT * WHERE A = 1 OR B != \"x\" LIMIT 4",
    ])?;
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["source"], "never-read.csv");
    assert_eq!(json["limit"], 4);
    assert!(json["predicate"].is_object());
    Ok(())
}

#[test]
fn test_errors_exit_non_zero() -> Result<()> {
    let output = csvq(&["query", "FROM \"x.csv\" SELECT a; b"])?;
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("Lexical error"), "stderr was: {stderr}");

    let output = csvq(&["parse", "FROM \"x.csv\""])?;
    assert!(!output.status.success());
    assert!(String::from_utf8(output.stderr)?.contains("Syntax error"));
    Ok(())
}
