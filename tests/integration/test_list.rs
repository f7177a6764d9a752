//! Tests for `list` and `summary`

use crate::helpers::*;
use anyhow::Result;
use serde_json::Value;

#[test]
fn test_list_without_store_shows_fallback() -> Result<()> {
  let board = TestBoard::new()?;

  let output = run_board(&board.path, &["list"])?;
  let out = stdout(&output);

  for header in ["Main Version", "Go Live Date", "Framework Version", "Released"] {
    assert!(out.contains(header), "missing column {}", header);
  }
  assert_eq!(out.matches("✅ Released").count(), 5);
  assert_eq!(out.matches("⏳ Pending").count(), 2);
  assert!(out.contains("7 of 7 release(s)"));

  // Fetch failure is logged, not fatal
  assert!(stderr(&output).contains("keeping fallback data"));
  Ok(())
}

#[test]
fn test_list_default_order_is_newest_first() -> Result<()> {
  let board = TestBoard::seeded()?;
  assert_eq!(board.listed_ids(&[])?, vec!["5", "3", "7", "2", "1", "4", "6"]);
  Ok(())
}

#[test]
fn test_list_filters() -> Result<()> {
  let board = TestBoard::seeded()?;

  assert_eq!(board.listed_ids(&["--status", "released", "--sort", "date"])?, vec![
    "6", "4", "1", "2", "7"
  ]);
  assert_eq!(board.listed_ids(&["--status", "pending", "--sort", "version"])?, vec![
    "5", "3"
  ]);
  assert_eq!(board.listed_ids(&["--framework", "REACT 18.2"])?, vec!["7", "1"]);
  assert!(board.listed_ids(&["--framework", "vue"])?.is_empty());

  Ok(())
}

#[test]
fn test_list_upcoming() -> Result<()> {
  let board = TestBoard::new()?;
  board.write_file(
    "releases.json",
    r#"[
  {"id":"past","mainVersion":"1.0.0","goLiveDate":"2020-01-01","frameworkVersion":"React 16","released":false},
  {"id":"shipped","mainVersion":"9.0.0","goLiveDate":"2999-01-01","frameworkVersion":"React 99","released":true},
  {"id":"next","mainVersion":"9.1.0","goLiveDate":"2999-06-01","frameworkVersion":"React 99","released":false}
]"#,
  )?;

  assert_eq!(board.listed_ids(&["--upcoming"])?, vec!["next"]);
  Ok(())
}

#[test]
fn test_list_uses_configured_sort() -> Result<()> {
  let board = TestBoard::seeded()?;
  board.write_file("board.toml", "[display]\nsort = \"version\"\n")?;

  let ids = board.listed_ids(&[])?;
  assert_eq!(ids.first().map(String::as_str), Some("5"));
  assert_eq!(ids.last().map(String::as_str), Some("4"));
  Ok(())
}

#[test]
fn test_list_with_explicit_config_path() -> Result<()> {
  let board = TestBoard::new()?;
  board.write_file("conf/board.toml", "[store]\npath = \"data.json\"\n")?;
  board.write_file(
    "conf/data.json",
    r#"[{"id":"only","mainVersion":"1.0","goLiveDate":"2024-01-01","frameworkVersion":"Svelte 5","released":true}]"#,
  )?;

  let output = run_board(&board.path, &["list", "--json", "--config", "conf/board.toml"])?;
  let rows: Vec<Value> = serde_json::from_slice(&output.stdout)?;
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0]["frameworkVersion"], "Svelte 5");
  Ok(())
}

#[test]
fn test_summary_json() -> Result<()> {
  let board = TestBoard::seeded()?;

  let output = run_board(&board.path, &["summary", "--json"])?;
  let summary: Value = serde_json::from_slice(&output.stdout)?;

  assert_eq!(summary["total"], 7);
  assert_eq!(summary["released"], 5);
  assert_eq!(summary["pending"], 2);
  assert_eq!(summary["latest_version"], "2.3.0");
  Ok(())
}
