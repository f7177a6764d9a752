//! Health check command for diagnosing configuration and store access
//!
//! Checks run in order: config file, remote settings and API key, store
//! reachability. Warnings are reported but do not fail the command.

use crate::core::config::ApiKeyStatus;
use crate::core::context::BoardContext;
use crate::core::error::{BoardError, BoardResult};
use crate::store::{ReleaseStore, StoreErrorCode};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
  Ok,
  Warning,
  Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
  pub check_name: &'static str,
  pub severity: Severity,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub suggestion: Option<String>,
}

impl CheckResult {
  fn ok(check_name: &'static str, message: impl Into<String>) -> Self {
    Self {
      check_name,
      severity: Severity::Ok,
      message: message.into(),
      suggestion: None,
    }
  }

  fn warning(check_name: &'static str, message: impl Into<String>, suggestion: impl Into<String>) -> Self {
    Self {
      check_name,
      severity: Severity::Warning,
      message: message.into(),
      suggestion: Some(suggestion.into()),
    }
  }

  fn error(check_name: &'static str, message: impl Into<String>, suggestion: impl Into<String>) -> Self {
    Self {
      check_name,
      severity: Severity::Error,
      message: message.into(),
      suggestion: Some(suggestion.into()),
    }
  }
}

fn check_config(ctx: &BoardContext) -> CheckResult {
  match &ctx.config_path {
    Some(path) => CheckResult::ok("config", format!("using {}", path.display())),
    None => CheckResult::warning(
      "config",
      "no board.toml found, using defaults",
      "Run `release-board init` to create one.",
    ),
  }
}

fn check_api_key(ctx: &BoardContext, now: DateTime<Utc>) -> Option<CheckResult> {
  let remote = ctx.config.remote.as_ref()?;
  let rotate = format!(
    "Rotate the key and set api_key_expires = \"{}\" ({}-day policy).",
    remote.next_expiry(now),
    remote.expires_in_days
  );

  Some(match remote.api_key_status(now) {
    ApiKeyStatus::Missing => CheckResult::error(
      "api-key",
      "no API key configured",
      "Set `api_key` or `api_key_env` under [remote].",
    ),
    ApiKeyStatus::Expired { on } => CheckResult::error("api-key", format!("API key expired on {}", on), rotate),
    ApiKeyStatus::ExpiringSoon { on, days_left } => CheckResult::warning(
      "api-key",
      format!("API key expires on {} ({} day(s) left)", on, days_left),
      rotate,
    ),
    ApiKeyStatus::Valid { until: Some(on) } => CheckResult::ok("api-key", format!("valid until {}", on)),
    ApiKeyStatus::Valid { until: None } => CheckResult::warning(
      "api-key",
      "API key present, expiry unknown",
      "Record api_key_expires under [remote] to get rotation warnings.",
    ),
  })
}

fn check_store(ctx: &BoardContext) -> CheckResult {
  let store = match ctx.open_store() {
    Ok(store) => store,
    Err(e) => return CheckResult::error("store", e.to_string(), "Fix the [store] and [remote] settings."),
  };

  match store.list() {
    Ok(releases) => CheckResult::ok(
      "store",
      format!("{} backend reachable, {} release(s)", store.name(), releases.len()),
    ),
    Err(e) if e.code == StoreErrorCode::NotFound && store.name() == "file" => CheckResult::warning(
      "store",
      format!("{} does not exist yet", ctx.store_file().display()),
      "Run `release-board init --seed` or add a release to create it.",
    ),
    Err(e) => CheckResult::error(
      "store",
      format!("{} backend failed: {}", store.name(), e),
      "Check the endpoint, network access and API key.",
    ),
  }
}

pub fn run_checks(ctx: &BoardContext, now: DateTime<Utc>) -> Vec<CheckResult> {
  let mut results = vec![check_config(ctx)];
  results.extend(check_api_key(ctx, now));
  results.push(check_store(ctx));
  results
}

/// Run the doctor command; fails with a validation exit code on any error
pub fn run_doctor(ctx: &BoardContext, json: bool) -> BoardResult<()> {
  let results = run_checks(ctx, Utc::now());
  let failed = results.iter().filter(|r| r.severity == Severity::Error).count();

  if json {
    println!("{}", serde_json::to_string_pretty(&results)?);
  } else {
    println!("🏥 Running health checks...\n");
    for result in &results {
      let icon = match result.severity {
        Severity::Ok => "✅",
        Severity::Warning => "⚠️ ",
        Severity::Error => "❌",
      };
      println!("{} {}: {}", icon, result.check_name, result.message);
      if let Some(suggestion) = &result.suggestion {
        println!("   💡 Fix: {}", suggestion);
      }
    }
    println!();
    println!(
      "Summary: {}/{} checks passed",
      results.iter().filter(|r| r.severity == Severity::Ok).count(),
      results.len()
    );
  }

  if failed > 0 {
    return Err(BoardError::Validation { failed });
  }
  Ok(())
}
