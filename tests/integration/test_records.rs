//! Tests for `add`, `edit` and `delete` against the file store

use crate::helpers::*;
use anyhow::Result;
use serde_json::Value;

#[test]
fn test_add_edit_delete_roundtrip() -> Result<()> {
  let board = TestBoard::seeded()?;

  let output = run_board(
    &board.path,
    &[
      "add",
      "--main-version",
      "3.0.0",
      "--date",
      "2025-06-01",
      "--framework",
      "React 19.1.0",
      "--json",
    ],
  )?;
  let added: Value = serde_json::from_slice(&output.stdout)?;
  let id = added["id"].as_str().unwrap_or_default().to_string();
  assert!(id.parse::<i64>().is_ok(), "generated id should be numeric: {}", id);
  assert_eq!(added["released"], false);

  let stored = board.stored_releases()?;
  assert_eq!(stored.len(), 8);
  assert_eq!(stored[7]["mainVersion"], "3.0.0");

  run_board(&board.path, &["edit", &id, "--released", "true"])?;
  let stored = board.stored_releases()?;
  let edited = stored.iter().find(|r| r["id"] == id.as_str()).expect("edited record");
  assert_eq!(edited["released"], true);
  assert_eq!(edited["frameworkVersion"], "React 19.1.0");

  let output = run_board(&board.path, &["delete", &id])?;
  assert!(stdout(&output).contains("Deleted 3.0.0"));
  assert_eq!(board.stored_releases()?.len(), 7);

  Ok(())
}

#[test]
fn test_add_with_blank_field_changes_nothing() -> Result<()> {
  let board = TestBoard::seeded()?;

  let output = run_board(
    &board.path,
    &["add", "--main-version", "  ", "--date", "2025-06-01", "--framework", "React 19"],
  )?;

  assert!(stdout(&output).contains("Nothing added"));
  assert_eq!(board.stored_releases()?.len(), 7);
  Ok(())
}

#[test]
fn test_add_creates_store_file() -> Result<()> {
  let board = TestBoard::new()?;
  run_board(&board.path, &["init"])?;

  run_board(
    &board.path,
    &["add", "--main-version", "0.1.0", "--date", "2025-01-01", "--framework", "Vue 3.5", "--released"],
  )?;

  let stored = board.stored_releases()?;
  assert_eq!(stored.len(), 1);
  assert_eq!(stored[0]["released"], true);
  Ok(())
}

#[test]
fn test_edit_blank_value_is_ignored() -> Result<()> {
  let board = TestBoard::seeded()?;

  let output = run_board(&board.path, &["edit", "3", "--framework", ""])?;
  assert!(stdout(&output).contains("Nothing changed"));

  let stored = board.stored_releases()?;
  let record = stored.iter().find(|r| r["id"] == "3").expect("record 3");
  assert_eq!(record["frameworkVersion"], "React 18.3.0");
  Ok(())
}

#[test]
fn test_unknown_id_is_a_user_error() -> Result<()> {
  let board = TestBoard::seeded()?;

  for args in [&["delete", "missing"][..], &["edit", "missing", "--released", "true"][..]] {
    let output = run_board_unchecked(&board.path, args)?;
    assert_eq!(output.status.code(), Some(1), "args: {:?}", args);
    assert!(stderr(&output).contains("Release 'missing' not found"));
  }

  assert_eq!(board.stored_releases()?.len(), 7);
  Ok(())
}

#[test]
fn test_edit_without_fields_fails() -> Result<()> {
  let board = TestBoard::seeded()?;

  let output = run_board_unchecked(&board.path, &["edit", "1"])?;
  assert!(!output.status.success());
  assert!(stderr(&output).contains("Nothing to change"));
  Ok(())
}
