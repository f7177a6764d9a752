use super::{ReleaseStore, StoreError, StoreErrorCode};
use crate::release::SoftwareRelease;

/// In-process store backed by a vector
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
  releases: Vec<SoftwareRelease>,
  unavailable: bool,
}

impl MemoryStore {
  pub fn new(releases: Vec<SoftwareRelease>) -> Self {
    Self {
      releases,
      unavailable: false,
    }
  }

  /// A store whose every call fails with a network error
  #[cfg(test)]
  pub fn unavailable() -> Self {
    Self {
      releases: Vec::new(),
      unavailable: true,
    }
  }

  fn check(&self) -> Result<(), StoreError> {
    if self.unavailable {
      return Err(StoreError::new(StoreErrorCode::Network, "memory store marked unavailable"));
    }
    Ok(())
  }
}

impl ReleaseStore for MemoryStore {
  fn name(&self) -> &'static str {
    "memory"
  }

  fn list(&self) -> Result<Vec<SoftwareRelease>, StoreError> {
    self.check()?;
    Ok(self.releases.clone())
  }

  fn create(&mut self, release: &SoftwareRelease) -> Result<SoftwareRelease, StoreError> {
    self.check()?;
    self.releases.push(release.clone());
    Ok(release.clone())
  }

  fn update(&mut self, release: &SoftwareRelease) -> Result<SoftwareRelease, StoreError> {
    self.check()?;
    let slot = self
      .releases
      .iter_mut()
      .find(|r| r.id == release.id)
      .ok_or_else(|| StoreError::not_found(&release.id))?;
    *slot = release.clone();
    Ok(release.clone())
  }

  fn delete(&mut self, id: &str) -> Result<(), StoreError> {
    self.check()?;
    let before = self.releases.len();
    self.releases.retain(|r| r.id != id);
    if self.releases.len() == before {
      return Err(StoreError::not_found(id));
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::release::fallback_releases;

  #[test]
  fn test_memory_store_crud() {
    let mut store = MemoryStore::default();
    let mut release = fallback_releases().remove(0);

    store.create(&release).unwrap();
    assert_eq!(store.list().unwrap().len(), 1);

    release.released = false;
    store.update(&release).unwrap();
    assert!(!store.list().unwrap()[0].released);

    store.delete(&release.id).unwrap();
    assert!(store.list().unwrap().is_empty());
    assert_eq!(store.delete(&release.id).unwrap_err().code, StoreErrorCode::NotFound);
  }

  #[test]
  fn test_unavailable_store_fails() {
    let store = MemoryStore::unavailable();
    assert_eq!(store.list().unwrap_err().code, StoreErrorCode::Network);
  }
}
