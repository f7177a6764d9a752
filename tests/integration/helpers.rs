//! Test helpers for integration tests

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A scratch directory for running the CLI
pub struct TestBoard {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestBoard {
  /// Empty directory, no board.toml
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();
    Ok(Self { _root: root, path })
  }

  /// board.toml plus a store file holding the sample releases
  pub fn seeded() -> Result<Self> {
    let board = Self::new()?;
    run_board(&board.path, &["init", "--seed"])?;
    Ok(board)
  }

  /// Write a file relative to the board directory
  pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
    let full = self.path.join(path);
    if let Some(parent) = full.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(full, content)?;
    Ok(())
  }

  /// Check if a file exists
  pub fn file_exists(&self, path: &str) -> bool {
    self.path.join(path).exists()
  }

  /// Parsed contents of the default store file
  pub fn stored_releases(&self) -> Result<Vec<Value>> {
    let raw = std::fs::read_to_string(self.path.join("releases.json"))?;
    Ok(serde_json::from_str(&raw)?)
  }

  /// Run `list --json` and return the ids in output order
  pub fn listed_ids(&self, extra: &[&str]) -> Result<Vec<String>> {
    let mut args = vec!["list", "--json"];
    args.extend_from_slice(extra);
    let output = run_board(&self.path, &args)?;
    let rows: Vec<Value> = serde_json::from_slice(&output.stdout).context("list --json output is not JSON")?;
    Ok(
      rows
        .iter()
        .map(|r| r["id"].as_str().unwrap_or_default().to_string())
        .collect(),
    )
  }
}

/// Run the release-board binary without checking the exit status
pub fn run_board_unchecked(cwd: &Path, args: &[&str]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_release-board");

  Command::new(bin)
    .current_dir(cwd)
    .args(args)
    .env_remove("RUST_LOG")
    .output()
    .context("Failed to run release-board")
}

/// Run the release-board binary and require success
pub fn run_board(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_board_unchecked(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "release-board command failed: release-board {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

pub fn stdout(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
  String::from_utf8_lossy(&output.stderr).to_string()
}
