//! JSON file backend
//!
//! The file holds a pretty-printed JSON array of releases. A missing file
//! lists as `NotFound` so a fresh session keeps its fallback data; the first
//! write creates it.

use super::{ReleaseStore, StoreError, StoreErrorCode};
use crate::release::SoftwareRelease;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct FileStore {
  path: PathBuf,
}

impl FileStore {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  fn read(&self) -> Result<Vec<SoftwareRelease>, StoreError> {
    let raw = fs::read_to_string(&self.path).map_err(|e| {
      if e.kind() == ErrorKind::NotFound {
        StoreError::new(
          StoreErrorCode::NotFound,
          format!("store file {} does not exist", self.path.display()),
        )
      } else {
        StoreError::new(StoreErrorCode::Io, format!("{}: {}", self.path.display(), e))
      }
    })?;
    serde_json::from_str(&raw)
      .map_err(|e| StoreError::new(StoreErrorCode::Decode, format!("{}: {}", self.path.display(), e)))
  }

  // First write to a missing file starts from an empty list.
  fn read_or_empty(&self) -> Result<Vec<SoftwareRelease>, StoreError> {
    match self.read() {
      Err(e) if e.code == StoreErrorCode::NotFound => Ok(Vec::new()),
      other => other,
    }
  }

  /// Replace the whole file with `releases`
  pub fn write_all(&self, releases: &[SoftwareRelease]) -> Result<(), StoreError> {
    let io_err = |e: std::io::Error| StoreError::new(StoreErrorCode::Io, format!("{}: {}", self.path.display(), e));

    if let Some(parent) = self.path.parent()
      && !parent.as_os_str().is_empty()
    {
      fs::create_dir_all(parent).map_err(io_err)?;
    }

    let body = serde_json::to_string_pretty(releases)
      .map_err(|e| StoreError::new(StoreErrorCode::Decode, e.to_string()))?;
    let tmp = self.path.with_extension("json.tmp");
    fs::write(&tmp, body + "\n").map_err(io_err)?;
    fs::rename(&tmp, &self.path).map_err(io_err)?;

    debug!(path = %self.path.display(), count = releases.len(), "wrote store file");
    Ok(())
  }
}

impl ReleaseStore for FileStore {
  fn name(&self) -> &'static str {
    "file"
  }

  fn list(&self) -> Result<Vec<SoftwareRelease>, StoreError> {
    self.read()
  }

  fn create(&mut self, release: &SoftwareRelease) -> Result<SoftwareRelease, StoreError> {
    let mut releases = self.read_or_empty()?;
    releases.push(release.clone());
    self.write_all(&releases)?;
    Ok(release.clone())
  }

  fn update(&mut self, release: &SoftwareRelease) -> Result<SoftwareRelease, StoreError> {
    let mut releases = self.read_or_empty()?;
    let slot = releases
      .iter_mut()
      .find(|r| r.id == release.id)
      .ok_or_else(|| StoreError::not_found(&release.id))?;
    *slot = release.clone();
    self.write_all(&releases)?;
    Ok(release.clone())
  }

  fn delete(&mut self, id: &str) -> Result<(), StoreError> {
    let mut releases = self.read_or_empty()?;
    let before = releases.len();
    releases.retain(|r| r.id != id);
    if releases.len() == before {
      return Err(StoreError::not_found(id));
    }
    self.write_all(&releases)
  }
}
