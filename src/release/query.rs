//! Filtering, sorting and search over an in-memory release list
//!
//! Every function here is pure: inputs are borrowed, results are new vectors,
//! and the only outside input is the clock passed to [`get_upcoming_at`].

use super::model::SoftwareRelease;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::cmp::Ordering;

/// Parse a go-live date
///
/// Plain `YYYY-MM-DD` dates are midnight UTC. RFC 3339 timestamps are accepted too.
pub fn parse_go_live(date: &str) -> Option<DateTime<Utc>> {
  let date = date.trim();
  if let Ok(day) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
    return day.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
  }
  DateTime::parse_from_rfc3339(date).ok().map(|dt| dt.with_timezone(&Utc))
}

/// Compare two dotted versions numerically (`2.10` > `2.9`)
///
/// Missing segments count as 0 and so do segments that are not numbers.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
  let left: Vec<&str> = a.split('.').map(segment_digits).collect();
  let right: Vec<&str> = b.split('.').map(segment_digits).collect();

  for i in 0..left.len().max(right.len()) {
    let l = left.get(i).copied().unwrap_or("0");
    let r = right.get(i).copied().unwrap_or("0");
    // Both sides are canonical digit strings, so the longer one is larger
    let ord = l.len().cmp(&r.len()).then_with(|| l.cmp(r));
    if ord != Ordering::Equal {
      return ord;
    }
  }
  Ordering::Equal
}

// Canonical digits of a segment, without leading zeros; "0" when not a number.
fn segment_digits(segment: &str) -> &str {
  let segment = segment.trim();
  let digits = segment.strip_prefix('+').unwrap_or(segment);
  if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
    return "0";
  }
  match digits.trim_start_matches('0') {
    "" => "0",
    rest => rest,
  }
}

// Undated records go last in either direction.
fn compare_dates(a: &SoftwareRelease, b: &SoftwareRelease, descending: bool) -> Ordering {
  match (parse_go_live(&a.go_live_date), parse_go_live(&b.go_live_date)) {
    (Some(x), Some(y)) if descending => y.cmp(&x),
    (Some(x), Some(y)) => x.cmp(&y),
    (Some(_), None) => Ordering::Less,
    (None, Some(_)) => Ordering::Greater,
    (None, None) => Ordering::Equal,
  }
}

/// Releases already shipped, in input order
pub fn filter_released(releases: &[SoftwareRelease]) -> Vec<SoftwareRelease> {
  releases.iter().filter(|r| r.released).cloned().collect()
}

/// Releases not yet shipped, in input order
pub fn filter_pending(releases: &[SoftwareRelease]) -> Vec<SoftwareRelease> {
  releases.iter().filter(|r| !r.released).cloned().collect()
}

/// Oldest go-live date first (stable)
pub fn sort_by_date(releases: &[SoftwareRelease]) -> Vec<SoftwareRelease> {
  let mut sorted = releases.to_vec();
  sorted.sort_by(|a, b| compare_dates(a, b, false));
  sorted
}

/// Newest go-live date first (stable)
pub fn sort_by_date_desc(releases: &[SoftwareRelease]) -> Vec<SoftwareRelease> {
  let mut sorted = releases.to_vec();
  sorted.sort_by(|a, b| compare_dates(a, b, true));
  sorted
}

/// Highest version first (stable, so `2.1` and `2.1.0` keep their input order)
pub fn sort_by_version(releases: &[SoftwareRelease]) -> Vec<SoftwareRelease> {
  let mut sorted = releases.to_vec();
  sorted.sort_by(|a, b| compare_versions(&b.main_version, &a.main_version));
  sorted
}

/// Case-insensitive substring match on the framework version
pub fn filter_by_framework(releases: &[SoftwareRelease], framework: &str) -> Vec<SoftwareRelease> {
  let needle = framework.to_lowercase();
  releases
    .iter()
    .filter(|r| r.framework_version.to_lowercase().contains(&needle))
    .cloned()
    .collect()
}

/// Pending releases whose go-live date is still ahead of `now`
pub fn get_upcoming_at(releases: &[SoftwareRelease], now: DateTime<Utc>) -> Vec<SoftwareRelease> {
  releases
    .iter()
    .filter(|r| !r.released && parse_go_live(&r.go_live_date).is_some_and(|date| date > now))
    .cloned()
    .collect()
}

/// Pending releases whose go-live date is in the future
pub fn get_upcoming(releases: &[SoftwareRelease]) -> Vec<SoftwareRelease> {
  get_upcoming_at(releases, Utc::now())
}

/// Headline numbers for a release list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseSummary {
  pub total: usize,
  pub released: usize,
  pub pending: usize,
  pub upcoming: usize,
  pub latest_version: Option<String>,
  pub next_go_live: Option<String>,
}

pub fn summarize(releases: &[SoftwareRelease], now: DateTime<Utc>) -> ReleaseSummary {
  let upcoming = sort_by_date(&get_upcoming_at(releases, now));
  ReleaseSummary {
    total: releases.len(),
    released: releases.iter().filter(|r| r.released).count(),
    pending: releases.iter().filter(|r| !r.released).count(),
    upcoming: upcoming.len(),
    latest_version: sort_by_version(releases).first().map(|r| r.main_version.clone()),
    next_go_live: upcoming.first().map(|r| r.go_live_date.clone()),
  }
}
