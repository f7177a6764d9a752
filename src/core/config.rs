use crate::core::error::{BoardError, BoardResult, ConfigError, ResultExt};
use crate::release::query::parse_go_live;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Days before expiry at which an API key is reported as expiring soon
const EXPIRY_WARNING_DAYS: i64 = 7;

/// Configuration for release-board
/// Searched in order: board.toml, .board.toml, .config/board.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardConfig {
  #[serde(default)]
  pub store: StoreConfig,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub remote: Option<RemoteConfig>,
  #[serde(default)]
  pub display: DisplayConfig,
}

/// Which backend holds the release records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
  #[default]
  File,
  Remote,
  Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
  #[serde(default)]
  pub backend: StoreBackend,

  /// File backend location, relative to the directory holding board.toml
  #[serde(default = "default_store_path")]
  pub path: PathBuf,
}

fn default_store_path() -> PathBuf {
  PathBuf::from("releases.json")
}

impl Default for StoreConfig {
  fn default() -> Self {
    Self {
      backend: StoreBackend::default(),
      path: default_store_path(),
    }
  }
}

/// Hosted data API settings
///
/// # Example
///
/// ```toml
/// [remote]
/// endpoint = "https://abc123.appsync-api.us-east-1.amazonaws.com/graphql"
/// api_key_env = "RELEASE_BOARD_API_KEY"
/// api_key_expires = "2026-11-18"
/// expires_in_days = 30
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
  pub endpoint: String,

  /// Literal API key (prefer `api_key_env` for shared configs)
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub api_key: Option<String>,

  /// Environment variable holding the API key; wins over `api_key`
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub api_key_env: Option<String>,

  /// Expiry date of the current key (YYYY-MM-DD)
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub api_key_expires: Option<String>,

  /// Rotation period the service enforces for API keys
  #[serde(default = "default_expires_in_days")]
  pub expires_in_days: u32,
}

fn default_expires_in_days() -> u32 {
  30
}

/// State of the configured API key at a point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiKeyStatus {
  Missing,
  Expired { on: NaiveDate },
  ExpiringSoon { on: NaiveDate, days_left: i64 },
  Valid { until: Option<NaiveDate> },
}

impl RemoteConfig {
  /// Resolve the API key from the environment or the literal value
  pub fn resolve_api_key(&self) -> Option<String> {
    self
      .api_key_env
      .as_ref()
      .and_then(|var| std::env::var(var).ok())
      .or_else(|| self.api_key.clone())
      .filter(|key| !key.trim().is_empty())
  }

  fn expiry_date(&self) -> Option<NaiveDate> {
    self.api_key_expires.as_deref().and_then(parse_go_live).map(|dt| dt.date_naive())
  }

  pub fn api_key_status(&self, now: DateTime<Utc>) -> ApiKeyStatus {
    if self.resolve_api_key().is_none() {
      return ApiKeyStatus::Missing;
    }
    let Some(on) = self.expiry_date() else {
      return ApiKeyStatus::Valid { until: None };
    };
    let today = now.date_naive();
    if on <= today {
      return ApiKeyStatus::Expired { on };
    }
    let days_left = (on - today).num_days();
    if days_left <= EXPIRY_WARNING_DAYS {
      ApiKeyStatus::ExpiringSoon { on, days_left }
    } else {
      ApiKeyStatus::Valid { until: Some(on) }
    }
  }

  /// Expiry date for a key rotated today
  pub fn next_expiry(&self, now: DateTime<Utc>) -> NaiveDate {
    (now + Duration::days(i64::from(self.expires_in_days))).date_naive()
  }

  pub fn validate(&self) -> BoardResult<()> {
    if self.endpoint.trim().is_empty() {
      return Err(BoardError::Config(ConfigError::MissingField {
        field: "remote.endpoint".to_string(),
      }));
    }
    if !(self.endpoint.starts_with("https://") || self.endpoint.starts_with("http://")) {
      return Err(BoardError::Config(ConfigError::InvalidField {
        field: "remote.endpoint".to_string(),
        reason: format!("'{}' is not an http(s) URL", self.endpoint),
      }));
    }
    if self.expires_in_days == 0 {
      return Err(BoardError::Config(ConfigError::InvalidField {
        field: "remote.expires_in_days".to_string(),
        reason: "must be at least 1".to_string(),
      }));
    }
    if let Some(expires) = &self.api_key_expires
      && self.expiry_date().is_none()
    {
      return Err(BoardError::Config(ConfigError::InvalidField {
        field: "remote.api_key_expires".to_string(),
        reason: format!("'{}' is not a YYYY-MM-DD date", expires),
      }));
    }
    Ok(())
  }
}

/// Default ordering for `list`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
  /// Newest go-live date first
  #[default]
  DateDesc,
  /// Oldest go-live date first
  Date,
  /// Highest version first
  Version,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DisplayConfig {
  #[serde(default)]
  pub sort: SortOrder,
}

impl BoardConfig {
  /// Find config file in search order: board.toml, .board.toml, .config/board.toml
  pub fn find_config_path(dir: &Path) -> Option<PathBuf> {
    let candidates = [
      dir.join("board.toml"),
      dir.join(".board.toml"),
      dir.join(".config").join("board.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Parse and validate a config file
  pub fn load(config_path: &Path) -> BoardResult<Self> {
    if !config_path.exists() {
      return Err(BoardError::Config(ConfigError::NotFound {
        path: config_path.to_path_buf(),
      }));
    }

    let content = fs::read_to_string(config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config = Self::parse(&content).with_context(|| format!("Invalid config in {}", config_path.display()))?;
    Ok(config)
  }

  pub fn parse(content: &str) -> BoardResult<Self> {
    let config: BoardConfig = toml_edit::de::from_str(content)?;
    config.validate()?;
    Ok(config)
  }

  pub fn validate(&self) -> BoardResult<()> {
    if let Some(remote) = &self.remote {
      remote.validate()?;
    }
    if self.store.backend == StoreBackend::Remote && self.remote.is_none() {
      return Err(BoardError::Config(ConfigError::MissingField {
        field: "remote (required by store.backend = \"remote\")".to_string(),
      }));
    }
    if self.store.backend == StoreBackend::File && self.store.path.as_os_str().is_empty() {
      return Err(BoardError::Config(ConfigError::MissingField {
        field: "store.path".to_string(),
      }));
    }
    Ok(())
  }

  /// Save config as board.toml in `dir`
  pub fn save(&self, dir: &Path) -> BoardResult<PathBuf> {
    let config_path = dir.join("board.toml");
    let content = toml_edit::ser::to_string_pretty(self).context("Failed to serialize config to TOML")?;
    fs::write(&config_path, content).with_context(|| format!("Failed to write config to {}", config_path.display()))?;
    Ok(config_path)
  }
}
