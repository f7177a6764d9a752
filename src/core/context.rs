//! Board context - resolve configuration once, hand the store to commands
//!
//! main.rs builds a [`BoardContext`] from `--config` or the working directory,
//! then every command opens its store through it. The store is always passed
//! down explicitly; nothing is kept in process-wide state.

use crate::core::config::{ApiKeyStatus, BoardConfig, StoreBackend};
use crate::core::error::{BoardError, BoardResult, ConfigError};
use crate::release::fallback_releases;
use crate::store::{FileStore, MemoryStore, ReleaseStore, RemoteStore};
use chrono::Utc;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct BoardContext {
  /// Directory relative paths in the config resolve against
  pub root: PathBuf,

  /// Config file in use, if one was found
  pub config_path: Option<PathBuf>,

  pub config: BoardConfig,
}

impl BoardContext {
  /// Resolve configuration
  ///
  /// An explicit path must exist. Otherwise the standard locations under
  /// `cwd` are searched and defaults apply when none is present.
  pub fn build(cwd: &Path, explicit: Option<&Path>) -> BoardResult<Self> {
    let config_path = match explicit {
      Some(path) => Some(cwd.join(path)),
      None => BoardConfig::find_config_path(cwd),
    };

    let (config, root) = match &config_path {
      Some(path) => {
        let config = BoardConfig::load(path)?;
        // .config/board.toml still resolves paths from the project directory
        let dir = path.parent().unwrap_or(cwd);
        let root = if dir.file_name().is_some_and(|n| n == ".config") {
          dir.parent().unwrap_or(cwd).to_path_buf()
        } else {
          dir.to_path_buf()
        };
        (config, root)
      }
      None => {
        debug!("no board.toml found, using defaults");
        (BoardConfig::default(), cwd.to_path_buf())
      }
    };

    Ok(Self {
      root,
      config_path,
      config,
    })
  }

  /// Absolute location of the file backend
  pub fn store_file(&self) -> PathBuf {
    self.root.join(&self.config.store.path)
  }

  /// Open the configured backend
  pub fn open_store(&self) -> BoardResult<Box<dyn ReleaseStore>> {
    match self.config.store.backend {
      StoreBackend::File => Ok(Box::new(FileStore::new(self.store_file()))),
      StoreBackend::Memory => Ok(Box::new(MemoryStore::new(fallback_releases()))),
      StoreBackend::Remote => {
        let remote = self.config.remote.as_ref().ok_or_else(|| {
          BoardError::Config(ConfigError::MissingField {
            field: "remote".to_string(),
          })
        })?;

        match remote.api_key_status(Utc::now()) {
          ApiKeyStatus::Missing => {
            return Err(BoardError::with_help(
              "No API key configured for the remote store",
              "Set `api_key` or `api_key_env` under [remote] in board.toml.",
            ));
          }
          ApiKeyStatus::Expired { on } => {
            warn!(expired_on = %on, "API key has expired; requests will likely be rejected");
          }
          ApiKeyStatus::ExpiringSoon { on, days_left } => {
            warn!(expires_on = %on, days_left, "API key expires soon; rotate it");
          }
          ApiKeyStatus::Valid { .. } => {}
        }

        let key = remote.resolve_api_key().unwrap_or_default();
        let store = RemoteStore::new(remote.endpoint.clone(), key);
        debug!(endpoint = store.endpoint(), "using remote store");
        Ok(Box::new(store))
      }
    }
  }
}
