//! Plain-text release table

use crate::release::SoftwareRelease;

const HEADERS: [&str; 5] = ["ID", "Main Version", "Go Live Date", "Framework Version", "Released"];

/// Status glyph and label for the Released column
pub fn status_label(released: bool) -> &'static str {
  if released { "✅ Released" } else { "⏳ Pending" }
}

fn cells(release: &SoftwareRelease) -> [&str; 5] {
  [
    release.id.as_str(),
    release.main_version.as_str(),
    release.go_live_date.as_str(),
    release.framework_version.as_str(),
    status_label(release.released),
  ]
}

/// Render releases as an aligned table, one row per release
pub fn render(releases: &[SoftwareRelease]) -> String {
  let mut widths = HEADERS.map(|h| h.chars().count());
  for release in releases {
    for (width, cell) in widths.iter_mut().zip(cells(release)) {
      *width = (*width).max(cell.chars().count());
    }
  }

  let line = |row: [&str; 5]| {
    let padded: Vec<String> = row
      .iter()
      .zip(widths)
      .enumerate()
      // Status is the last column; no trailing padding
      .map(|(i, (cell, width))| if i == row.len() - 1 { cell.to_string() } else { format!("{:<width$}", cell) })
      .collect();
    padded.join("  ")
  };

  let mut out = String::new();
  out.push_str(&line(HEADERS));
  out.push('\n');
  out.push_str(&line(widths.map(|w| "-".repeat(w)).each_ref().map(String::as_str)));
  out.push('\n');
  for release in releases {
    out.push_str(&line(cells(release)));
    out.push('\n');
  }
  out
}
