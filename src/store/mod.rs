//! Release store abstraction
//!
//! The session talks to whatever backend it was handed through [`ReleaseStore`].
//! Three backends exist:
//!
//! - **memory**: a plain vector, nothing survives the process
//! - **file**: a JSON array of records on disk
//! - **remote**: the hosted GraphQL data API, authorized with an API key

use crate::release::SoftwareRelease;
use std::fmt::{Display, Formatter};

pub mod file;
pub mod memory;
pub mod remote;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use remote::RemoteStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorCode {
  NotFound,
  Unauthorized,
  Network,
  Remote,
  Io,
  Decode,
}

impl StoreErrorCode {
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::NotFound => "not_found",
      Self::Unauthorized => "unauthorized",
      Self::Network => "network_error",
      Self::Remote => "remote_error",
      Self::Io => "io_error",
      Self::Decode => "decode_error",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
  pub code: StoreErrorCode,
  pub message: String,
}

impl StoreError {
  pub fn new(code: StoreErrorCode, message: impl Into<String>) -> Self {
    Self {
      code,
      message: message.into(),
    }
  }

  pub fn not_found(id: &str) -> Self {
    Self::new(StoreErrorCode::NotFound, format!("no release with id '{}'", id))
  }
}

impl Display for StoreError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}: {}", self.code.as_str(), self.message)
  }
}

impl std::error::Error for StoreError {}

/// CRUD access to persisted release records
pub trait ReleaseStore {
  /// Short backend name for logs and diagnostics
  fn name(&self) -> &'static str;

  /// Fetch every stored release
  fn list(&self) -> Result<Vec<SoftwareRelease>, StoreError>;

  /// Persist a new release, returning the stored form
  fn create(&mut self, release: &SoftwareRelease) -> Result<SoftwareRelease, StoreError>;

  /// Replace the stored release with the same id
  fn update(&mut self, release: &SoftwareRelease) -> Result<SoftwareRelease, StoreError>;

  /// Remove the release with this id
  fn delete(&mut self, id: &str) -> Result<(), StoreError>;
}

impl<S: ReleaseStore + ?Sized> ReleaseStore for Box<S> {
  fn name(&self) -> &'static str {
    (**self).name()
  }

  fn list(&self) -> Result<Vec<SoftwareRelease>, StoreError> {
    (**self).list()
  }

  fn create(&mut self, release: &SoftwareRelease) -> Result<SoftwareRelease, StoreError> {
    (**self).create(release)
  }

  fn update(&mut self, release: &SoftwareRelease) -> Result<SoftwareRelease, StoreError> {
    (**self).update(release)
  }

  fn delete(&mut self, id: &str) -> Result<(), StoreError> {
    (**self).delete(id)
  }
}
