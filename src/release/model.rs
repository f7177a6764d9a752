//! Release record types, remote ingestion and id generation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single tracked release
///
/// Field names serialize in camelCase to match the hosted data API schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftwareRelease {
  pub id: String,
  pub main_version: String,
  pub go_live_date: String,
  pub framework_version: String,
  pub released: bool,
}

/// A release record as delivered by the remote API
///
/// Every field other than `id` is optional in the schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteRelease {
  pub id: String,
  #[serde(default)]
  pub main_version: Option<String>,
  #[serde(default)]
  pub go_live_date: Option<String>,
  #[serde(default)]
  pub framework_version: Option<String>,
  #[serde(default)]
  pub released: Option<bool>,
}

/// Fill schema defaults for a remote record: empty strings and `released = false`
pub fn ingest(remote: RemoteRelease) -> SoftwareRelease {
  SoftwareRelease {
    id: remote.id,
    main_version: remote.main_version.unwrap_or_default(),
    go_live_date: remote.go_live_date.unwrap_or_default(),
    framework_version: remote.framework_version.unwrap_or_default(),
    released: remote.released.unwrap_or(false),
  }
}

/// User input for creating or editing a release
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseDraft {
  pub main_version: String,
  pub go_live_date: String,
  pub framework_version: String,
  pub released: bool,
}

impl ReleaseDraft {
  /// All three text fields must be non-blank
  pub fn is_valid(&self) -> bool {
    !self.main_version.trim().is_empty()
      && !self.go_live_date.trim().is_empty()
      && !self.framework_version.trim().is_empty()
  }

  /// Build a draft pre-filled from an existing record
  pub fn from_release(release: &SoftwareRelease) -> Self {
    Self {
      main_version: release.main_version.clone(),
      go_live_date: release.go_live_date.clone(),
      framework_version: release.framework_version.clone(),
      released: release.released,
    }
  }

  /// Turn the draft into a record with the given id
  pub fn into_release(self, id: String) -> SoftwareRelease {
    SoftwareRelease {
      id,
      main_version: self.main_version.trim().to_string(),
      go_live_date: self.go_live_date.trim().to_string(),
      framework_version: self.framework_version.trim().to_string(),
      released: self.released,
    }
  }
}

/// Millisecond timestamp id, bumped until it does not collide with `existing`
pub fn generate_id(now: DateTime<Utc>, existing: &[SoftwareRelease]) -> String {
  let mut candidate = now.timestamp_millis();
  while existing.iter().any(|r| r.id == candidate.to_string()) {
    candidate += 1;
  }
  candidate.to_string()
}

fn record(id: &str, main_version: &str, go_live_date: &str, framework_version: &str, released: bool) -> SoftwareRelease {
  SoftwareRelease {
    id: id.to_string(),
    main_version: main_version.to_string(),
    go_live_date: go_live_date.to_string(),
    framework_version: framework_version.to_string(),
    released,
  }
}

/// Static list shown until (or instead of) data from the store
pub fn fallback_releases() -> Vec<SoftwareRelease> {
  vec![
    record("1", "2.1.0", "2024-01-15", "React 18.2.0", true),
    record("2", "2.0.5", "2024-02-20", "React 18.1.0", true),
    record("3", "2.2.0", "2024-03-10", "React 18.3.0", false),
    record("4", "1.9.8", "2023-12-05", "React 17.0.2", true),
    record("5", "2.3.0", "2024-04-15", "React 19.0.0", false),
    record("6", "2.0.0", "2023-11-20", "React 18.0.0", true),
    record("7", "2.1.5", "2024-02-28", "React 18.2.1", true),
  ]
}
