//! Error types for release-board with contextual messages and exit codes
//!
//! Every command returns a [`BoardResult`]. Errors carry an exit code category
//! and, where possible, a help line telling the user what to do next.

use crate::store::{StoreError, StoreErrorCode};
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for release-board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, unknown ids)
  User = 1,
  /// System error (I/O, network)
  System = 2,
  /// Validation failure (doctor checks failed)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for release-board
#[derive(Debug)]
pub enum BoardError {
  /// Configuration errors
  Config(ConfigError),

  /// Release store errors (file or remote backend)
  Store(StoreError),

  /// One or more health checks failed
  Validation { failed: usize },

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl BoardError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    BoardError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    BoardError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  ///
  /// Structured variants are flattened into a message so the context line is
  /// never lost; their help text is carried over.
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      BoardError::Message { message, context, help } => BoardError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      other => {
        let help = other.help_message();
        BoardError::Message {
          message: ctx_str,
          context: Some(other.to_string()),
          help,
        }
      }
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      BoardError::Config(_) => ExitCode::User,
      BoardError::Store(e) => match e.code {
        StoreErrorCode::NotFound | StoreErrorCode::Unauthorized => ExitCode::User,
        _ => ExitCode::System,
      },
      BoardError::Validation { .. } => ExitCode::Validation,
      BoardError::Io(_) => ExitCode::System,
      BoardError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      BoardError::Config(e) => e.help_message(),
      BoardError::Store(e) => match e.code {
        StoreErrorCode::Unauthorized => {
          Some("The API key was rejected. Rotate it and update [remote] in board.toml.".to_string())
        }
        StoreErrorCode::Network => Some("Run `release-board doctor` to check the remote endpoint.".to_string()),
        StoreErrorCode::NotFound => Some("List current ids with `release-board list`.".to_string()),
        _ => None,
      },
      BoardError::Validation { .. } => Some("Fix the failed checks above and run `release-board doctor` again.".to_string()),
      BoardError::Message { help, .. } => help.clone(),
      BoardError::Io(_) => None,
    }
  }
}

impl fmt::Display for BoardError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      BoardError::Config(e) => write!(f, "{}", e),
      BoardError::Store(e) => write!(f, "Release store error: {}", e),
      BoardError::Validation { failed } => write!(f, "{} health check(s) failed", failed),
      BoardError::Io(e) => write!(f, "I/O error: {}", e),
      BoardError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for BoardError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      BoardError::Io(e) => Some(e),
      BoardError::Store(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for BoardError {
  fn from(err: io::Error) -> Self {
    BoardError::Io(err)
  }
}

impl From<String> for BoardError {
  fn from(msg: String) -> Self {
    BoardError::message(msg)
  }
}

impl From<&str> for BoardError {
  fn from(msg: &str) -> Self {
    BoardError::message(msg)
  }
}

impl From<StoreError> for BoardError {
  fn from(err: StoreError) -> Self {
    BoardError::Store(err)
  }
}

impl From<ConfigError> for BoardError {
  fn from(err: ConfigError) -> Self {
    BoardError::Config(err)
  }
}

impl From<toml_edit::de::Error> for BoardError {
  fn from(err: toml_edit::de::Error) -> Self {
    BoardError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<toml_edit::ser::Error> for BoardError {
  fn from(err: toml_edit::ser::Error) -> Self {
    BoardError::message(format!("TOML serialization error: {}", err))
  }
}

impl From<serde_json::Error> for BoardError {
  fn from(err: serde_json::Error) -> Self {
    BoardError::message(format!("JSON error: {}", err))
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// An explicit `--config` path does not exist
  NotFound { path: PathBuf },

  /// Missing required field
  MissingField { field: String },

  /// Field present but unusable
  InvalidField { field: String, reason: String },

  /// board.toml already exists and `--force` was not given
  AlreadyExists { path: PathBuf },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => Some("Run `release-board init` to create a configuration file.".to_string()),
      ConfigError::MissingField { field } if field.starts_with("remote") => {
        Some("Add a [remote] section with `endpoint` and `api_key` (or `api_key_env`).".to_string())
      }
      ConfigError::AlreadyExists { .. } => Some("Pass --force to overwrite it.".to_string()),
      _ => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { path } => {
        write!(f, "Configuration file not found: {}", path.display())
      }
      ConfigError::MissingField { field } => {
        write!(f, "Missing required field in config: {}", field)
      }
      ConfigError::InvalidField { field, reason } => {
        write!(f, "Invalid value for '{}': {}", field, reason)
      }
      ConfigError::AlreadyExists { path } => {
        write!(f, "Configuration already exists: {}", path.display())
      }
    }
  }
}

/// Result type alias for release-board
pub type BoardResult<T> = Result<T, BoardError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> BoardResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> BoardResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<BoardError>,
{
  fn context(self, ctx: impl Into<String>) -> BoardResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> BoardResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &BoardError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
