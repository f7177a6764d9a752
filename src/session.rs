//! Working session over a release list
//!
//! A session starts from the static fallback list, replaces it with whatever
//! the store returns on [`ReleaseSession::load`], and applies create, edit and
//! delete to the store and to its own list. Incomplete input is ignored
//! rather than reported.

use crate::release::query::sort_by_date_desc;
use crate::release::{ReleaseDraft, SoftwareRelease, fallback_releases, generate_id};
use crate::store::{ReleaseStore, StoreError};
use chrono::Utc;
use tracing::{debug, info, warn};

/// Where the session's current list came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListSource {
  Fallback,
  Store,
}

pub struct ReleaseSession<S: ReleaseStore> {
  store: S,
  releases: Vec<SoftwareRelease>,
  source: ListSource,
}

impl<S: ReleaseStore> ReleaseSession<S> {
  pub fn new(store: S) -> Self {
    Self {
      store,
      releases: fallback_releases(),
      source: ListSource::Fallback,
    }
  }

  /// Fetch once from the store; on failure keep the current list
  pub fn load(&mut self) -> ListSource {
    match self.store.list() {
      Ok(releases) => {
        info!(backend = self.store.name(), count = releases.len(), "loaded releases");
        self.releases = releases;
        self.source = ListSource::Store;
      }
      Err(e) => {
        warn!(backend = self.store.name(), error = %e, "could not fetch releases, keeping fallback data");
      }
    }
    self.source
  }

  pub fn source(&self) -> ListSource {
    self.source
  }

  pub fn releases(&self) -> &[SoftwareRelease] {
    &self.releases
  }

  pub fn find(&self, id: &str) -> Option<&SoftwareRelease> {
    self.releases.iter().find(|r| r.id == id)
  }

  /// Newest go-live date first
  pub fn display_rows(&self) -> Vec<SoftwareRelease> {
    sort_by_date_desc(&self.releases)
  }

  /// Add a release; `Ok(None)` when a required field is blank
  pub fn create(&mut self, draft: ReleaseDraft) -> Result<Option<SoftwareRelease>, StoreError> {
    if !draft.is_valid() {
      debug!("ignoring incomplete release draft");
      return Ok(None);
    }

    let release = draft.into_release(generate_id(Utc::now(), &self.releases));
    let stored = self.store.create(&release)?;
    self.releases.push(stored.clone());
    Ok(Some(stored))
  }

  /// Replace the release with `id`; `Ok(None)` for unknown ids or blank fields
  pub fn edit(&mut self, id: &str, draft: ReleaseDraft) -> Result<Option<SoftwareRelease>, StoreError> {
    if !draft.is_valid() {
      debug!(id, "ignoring incomplete edit");
      return Ok(None);
    }
    let Some(index) = self.releases.iter().position(|r| r.id == id) else {
      debug!(id, "edit target not in session");
      return Ok(None);
    };

    let stored = self.store.update(&draft.into_release(id.to_string()))?;
    self.releases[index] = stored.clone();
    Ok(Some(stored))
  }

  /// Remove the release with `id`; `Ok(false)` when it is not in the list
  pub fn delete(&mut self, id: &str) -> Result<bool, StoreError> {
    if self.find(id).is_none() {
      return Ok(false);
    }
    self.store.delete(id)?;
    self.releases.retain(|r| r.id != id);
    Ok(true)
  }
}
