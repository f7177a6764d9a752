//! `add`, `edit` and `delete` - single-record changes

use crate::core::context::BoardContext;
use crate::core::error::{BoardError, BoardResult, ResultExt};
use crate::release::{ReleaseDraft, SoftwareRelease};
use crate::session::ReleaseSession;
use crate::ui::table::status_label;

/// Field overrides for `edit`; `None` keeps the current value
#[derive(Debug, Clone, Default)]
pub struct EditFields {
  pub main_version: Option<String>,
  pub go_live_date: Option<String>,
  pub framework_version: Option<String>,
  pub released: Option<bool>,
}

impl EditFields {
  pub fn is_empty(&self) -> bool {
    self.main_version.is_none()
      && self.go_live_date.is_none()
      && self.framework_version.is_none()
      && self.released.is_none()
  }

  /// Overlay these fields on an existing record
  pub fn merge(self, current: &SoftwareRelease) -> ReleaseDraft {
    let base = ReleaseDraft::from_release(current);
    ReleaseDraft {
      main_version: self.main_version.unwrap_or(base.main_version),
      go_live_date: self.go_live_date.unwrap_or(base.go_live_date),
      framework_version: self.framework_version.unwrap_or(base.framework_version),
      released: self.released.unwrap_or(base.released),
    }
  }
}

fn not_found(id: &str) -> BoardError {
  BoardError::with_help(
    format!("Release '{}' not found", id),
    "List current ids with `release-board list`.",
  )
}

fn describe(release: &SoftwareRelease) -> String {
  format!(
    "{} ({}, {}, {}) [id {}]",
    release.main_version,
    release.go_live_date,
    release.framework_version,
    status_label(release.released),
    release.id
  )
}

pub fn run_add(ctx: &BoardContext, draft: ReleaseDraft, json: bool) -> BoardResult<()> {
  let mut session = ReleaseSession::new(ctx.open_store()?);
  session.load();

  match session.create(draft).context("Failed to add release")? {
    Some(release) if json => println!("{}", serde_json::to_string_pretty(&release)?),
    Some(release) => println!("✅ Added {}", describe(&release)),
    None => println!("⚠️  Nothing added: main version, go-live date and framework version are required"),
  }
  Ok(())
}

pub fn run_edit(ctx: &BoardContext, id: String, fields: EditFields, json: bool) -> BoardResult<()> {
  if fields.is_empty() {
    return Err(BoardError::with_help(
      "Nothing to change",
      "Pass at least one of --main-version, --date, --framework or --released.",
    ));
  }

  let mut session = ReleaseSession::new(ctx.open_store()?);
  session.load();

  let current = session.find(&id).ok_or_else(|| not_found(&id))?;
  let draft = fields.merge(current);

  match session
    .edit(&id, draft)
    .with_context(|| format!("Failed to update release '{}'", id))?
  {
    Some(release) if json => println!("{}", serde_json::to_string_pretty(&release)?),
    Some(release) => println!("✅ Updated {}", describe(&release)),
    None => println!("⚠️  Nothing changed: fields cannot be blank"),
  }
  Ok(())
}

pub fn run_delete(ctx: &BoardContext, id: String) -> BoardResult<()> {
  let mut session = ReleaseSession::new(ctx.open_store()?);
  session.load();

  let removed = session.find(&id).cloned();
  if !session
    .delete(&id)
    .with_context(|| format!("Failed to delete release '{}'", id))?
  {
    return Err(not_found(&id));
  }

  if let Some(release) = removed {
    println!("🗑️  Deleted {}", describe(&release));
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::release::fallback_releases;

  #[test]
  fn test_merge_keeps_unset_fields() {
    let current = fallback_releases().remove(2);
    let draft = EditFields {
      released: Some(true),
      ..Default::default()
    }
    .merge(&current);

    assert_eq!(draft.main_version, "2.2.0");
    assert_eq!(draft.go_live_date, "2024-03-10");
    assert_eq!(draft.framework_version, "React 18.3.0");
    assert!(draft.released);
  }

  #[test]
  fn test_merge_overrides_set_fields() {
    let current = fallback_releases().remove(0);
    let draft = EditFields {
      main_version: Some("2.1.1".to_string()),
      framework_version: Some(String::new()),
      ..Default::default()
    }
    .merge(&current);

    assert_eq!(draft.main_version, "2.1.1");
    assert!(!draft.is_valid());
  }

  #[test]
  fn test_empty_fields() {
    assert!(EditFields::default().is_empty());
    assert!(
      !EditFields {
        go_live_date: Some("2025-01-01".to_string()),
        ..Default::default()
      }
      .is_empty()
    );
  }
}
