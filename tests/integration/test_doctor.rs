//! Tests for the `doctor` command

use crate::helpers::*;
use anyhow::Result;
use serde_json::Value;

fn checks(output: &std::process::Output) -> Result<Vec<Value>> {
  Ok(serde_json::from_slice(&output.stdout)?)
}

#[test]
fn test_doctor_without_config_only_warns() -> Result<()> {
  let board = TestBoard::new()?;

  let output = run_board(&board.path, &["doctor", "--json"])?;
  let results = checks(&output)?;

  assert_eq!(results.len(), 2);
  assert_eq!(results[0]["check_name"], "config");
  assert_eq!(results[0]["severity"], "warning");
  assert_eq!(results[1]["check_name"], "store");
  assert_eq!(results[1]["severity"], "warning");
  Ok(())
}

#[test]
fn test_doctor_seeded_board_passes() -> Result<()> {
  let board = TestBoard::seeded()?;

  let output = run_board(&board.path, &["doctor"])?;
  let out = stdout(&output);
  assert!(out.contains("file backend reachable, 7 release(s)"));
  assert!(out.contains("Summary: 2/2 checks passed"));
  Ok(())
}

#[test]
fn test_doctor_expired_key_fails_validation() -> Result<()> {
  let board = TestBoard::new()?;
  board.write_file(
    "board.toml",
    r#"[store]
backend = "remote"

[remote]
endpoint = "http://127.0.0.1:9/graphql"
api_key = "da2-expired"
api_key_expires = "2020-01-01"
"#,
  )?;

  let output = run_board_unchecked(&board.path, &["doctor", "--json"])?;
  assert_eq!(output.status.code(), Some(3));

  let results = checks(&output)?;
  let api_key = results
    .iter()
    .find(|r| r["check_name"] == "api-key")
    .expect("api-key check");
  assert_eq!(api_key["severity"], "error");
  assert!(api_key["message"].as_str().unwrap_or_default().contains("2020-01-01"));
  Ok(())
}

#[test]
fn test_doctor_corrupt_store_is_an_error() -> Result<()> {
  let board = TestBoard::new()?;
  board.write_file("releases.json", "{ not json")?;

  let output = run_board_unchecked(&board.path, &["doctor", "--json"])?;
  assert_eq!(output.status.code(), Some(3));

  let results = checks(&output)?;
  assert_eq!(results[1]["severity"], "error");
  Ok(())
}
