//! Tests for the `init` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_init_creates_config() -> Result<()> {
  let board = TestBoard::new()?;

  let output = run_board(&board.path, &["init"])?;

  assert!(board.file_exists("board.toml"));
  assert!(!board.file_exists("releases.json"), "store file only written with --seed");
  assert!(stdout(&output).contains("board.toml"));

  let config = std::fs::read_to_string(board.path.join("board.toml"))?;
  assert!(config.contains("backend = \"file\""));
  assert!(config.contains("releases.json"));

  Ok(())
}

#[test]
fn test_init_seed_writes_sample_releases() -> Result<()> {
  let board = TestBoard::new()?;
  run_board(&board.path, &["init", "--seed"])?;

  let releases = board.stored_releases()?;
  assert_eq!(releases.len(), 7);
  assert_eq!(releases[0]["mainVersion"], "2.1.0");
  assert_eq!(releases[0]["goLiveDate"], "2024-01-15");

  Ok(())
}

#[test]
fn test_init_twice_needs_force() -> Result<()> {
  let board = TestBoard::new()?;
  run_board(&board.path, &["init"])?;

  let output = run_board_unchecked(&board.path, &["init"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("already exists"));

  run_board(&board.path, &["init", "--force"])?;
  Ok(())
}
