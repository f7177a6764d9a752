//! `list` - show releases as a table or JSON

use crate::core::config::SortOrder;
use crate::core::context::BoardContext;
use crate::core::error::BoardResult;
use crate::release::SoftwareRelease;
use crate::release::query::{
  filter_by_framework, filter_pending, filter_released, get_upcoming, get_upcoming_at, sort_by_date,
  sort_by_date_desc, sort_by_version,
};
use crate::session::{ListSource, ReleaseSession};
use crate::ui::table;
use chrono::{DateTime, Utc};

/// Which releases `list` shows by status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum StatusFilter {
  #[default]
  All,
  Released,
  Pending,
}

#[derive(Debug, Clone, Default)]
pub struct ListOptions {
  pub status: StatusFilter,
  pub framework: Option<String>,
  pub upcoming: bool,
  pub sort: Option<SortOrder>,
  pub json: bool,
}

/// Apply the list options to a release list
///
/// Filters run first (status, framework, upcoming), then the sort. Without an
/// explicit sort the configured default applies.
pub fn select(
  releases: &[SoftwareRelease],
  opts: &ListOptions,
  default_sort: SortOrder,
  now: DateTime<Utc>,
) -> Vec<SoftwareRelease> {
  let mut rows = match opts.status {
    StatusFilter::All => releases.to_vec(),
    StatusFilter::Released => filter_released(releases),
    StatusFilter::Pending => filter_pending(releases),
  };

  if let Some(needle) = &opts.framework {
    rows = filter_by_framework(&rows, needle);
  }
  if opts.upcoming {
    rows = get_upcoming_at(&rows, now);
  }

  match opts.sort.unwrap_or(default_sort) {
    SortOrder::DateDesc => sort_by_date_desc(&rows),
    SortOrder::Date => sort_by_date(&rows),
    SortOrder::Version => sort_by_version(&rows),
  }
}

pub fn run_list(ctx: &BoardContext, opts: ListOptions) -> BoardResult<()> {
  let mut session = ReleaseSession::new(ctx.open_store()?);
  session.load();

  // Start from the newest-first view so ties under other sorts break by date
  let rows = select(&session.display_rows(), &opts, ctx.config.display.sort, Utc::now());

  if opts.json {
    println!("{}", serde_json::to_string_pretty(&rows)?);
    return Ok(());
  }

  if rows.is_empty() {
    println!("No releases match.");
    return Ok(());
  }

  print!("{}", table::render(&rows));
  println!();
  let upcoming = get_upcoming(session.releases()).len();
  let origin = match session.source() {
    ListSource::Store => "",
    ListSource::Fallback => " (sample data)",
  };
  println!(
    "{} of {} release(s), {} upcoming{}",
    rows.len(),
    session.releases().len(),
    upcoming,
    origin
  );
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::release::fallback_releases;
  use chrono::TimeZone;

  fn ids(rows: &[SoftwareRelease]) -> Vec<&str> {
    rows.iter().map(|r| r.id.as_str()).collect()
  }

  fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
  }

  #[test]
  fn test_default_is_all_newest_first() {
    let rows = select(&fallback_releases(), &ListOptions::default(), SortOrder::DateDesc, now());
    assert_eq!(ids(&rows), vec!["5", "3", "7", "2", "1", "4", "6"]);
  }

  #[test]
  fn test_configured_default_sort_applies() {
    let rows = select(&fallback_releases(), &ListOptions::default(), SortOrder::Version, now());
    assert_eq!(rows[0].main_version, "2.3.0");
  }

  #[test]
  fn test_status_and_explicit_sort() {
    let opts = ListOptions {
      status: StatusFilter::Released,
      sort: Some(SortOrder::Date),
      ..Default::default()
    };
    let rows = select(&fallback_releases(), &opts, SortOrder::DateDesc, now());
    assert_eq!(ids(&rows), vec!["6", "4", "1", "2", "7"]);
  }

  #[test]
  fn test_framework_and_upcoming_combine() {
    let opts = ListOptions {
      framework: Some("react 18".to_string()),
      upcoming: true,
      ..Default::default()
    };
    let rows = select(&fallback_releases(), &opts, SortOrder::DateDesc, now());
    assert_eq!(ids(&rows), vec!["3"]);
  }
}
