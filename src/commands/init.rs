use crate::core::config::BoardConfig;
use crate::core::error::{BoardError, BoardResult, ConfigError, ResultExt};
use crate::release::fallback_releases;
use crate::store::FileStore;
use std::path::Path;

/// Write a default board.toml in `dir`, optionally seeding the store file
pub fn run_init(dir: &Path, seed: bool, force: bool) -> BoardResult<()> {
  if let Some(existing) = BoardConfig::find_config_path(dir)
    && !force
  {
    return Err(BoardError::Config(ConfigError::AlreadyExists { path: existing }));
  }

  let config = BoardConfig::default();
  let config_path = config.save(dir)?;
  println!("📝 Wrote {}", config_path.display());

  if seed {
    let store = FileStore::new(dir.join(&config.store.path));
    if store.path().exists() && !force {
      println!("⚠️  {} already exists, not seeding (use --force)", store.path().display());
    } else {
      let releases = fallback_releases();
      store
        .write_all(&releases)
        .with_context(|| format!("Failed to seed {}", store.path().display()))?;
      println!("🌱 Seeded {} with {} sample releases", store.path().display(), releases.len());
    }
  }

  println!();
  println!("Next steps:");
  println!("  release-board list");
  println!("  release-board add --main-version 1.0.0 --date 2025-01-01 --framework \"React 19.0.0\"");
  Ok(())
}
