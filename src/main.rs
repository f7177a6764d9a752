mod commands;
mod core;
mod release;
mod session;
mod store;
mod ui;

use crate::commands::{EditFields, ListOptions, StatusFilter};
use crate::core::config::SortOrder;
use crate::core::context::BoardContext;
use crate::core::error::{BoardError, print_error};
use crate::release::ReleaseDraft;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Track software releases: versions, go-live dates, framework versions
#[derive(Parser)]
#[command(name = "release-board")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  /// Path to board.toml (default: search the current directory)
  #[arg(short, long, global = true)]
  config: Option<PathBuf>,

  /// Increase log verbosity (-v info, -vv debug)
  #[arg(short, long, action = ArgAction::Count, global = true)]
  verbose: u8,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  // ============================================================================
  // Setup & Inspection
  // ============================================================================
  /// Create board.toml in the current directory
  Init {
    /// Also write the sample releases to the store file
    #[arg(long)]
    seed: bool,
    /// Overwrite existing files
    #[arg(long)]
    force: bool,
  },

  /// Check configuration, API key and store access
  Doctor {
    /// Output results in JSON format
    #[arg(long)]
    json: bool,
  },

  // ============================================================================
  // Records
  // ============================================================================
  /// Show releases
  List {
    /// Only released or only pending releases
    #[arg(long, value_enum, default_value_t = StatusFilter::All)]
    status: StatusFilter,
    /// Case-insensitive substring of the framework version
    #[arg(long)]
    framework: Option<String>,
    /// Only pending releases with a go-live date in the future
    #[arg(long)]
    upcoming: bool,
    /// Sort order (default from board.toml, else newest first)
    #[arg(long, value_enum)]
    sort: Option<SortOrder>,
    /// Output releases in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Add a release
  Add {
    /// Main version, e.g. 2.1.0
    #[arg(long = "main-version", value_name = "VERSION")]
    main_version: String,
    /// Go-live date, YYYY-MM-DD
    #[arg(long = "date", value_name = "DATE")]
    go_live_date: String,
    /// Framework version, e.g. "React 18.2.0"
    #[arg(long = "framework", value_name = "FRAMEWORK")]
    framework_version: String,
    /// Mark the release as already released
    #[arg(long)]
    released: bool,
    /// Print the stored release as JSON
    #[arg(long)]
    json: bool,
  },

  /// Change fields of a release
  Edit {
    /// Id of the release to change
    id: String,
    #[arg(long = "main-version", value_name = "VERSION")]
    main_version: Option<String>,
    #[arg(long = "date", value_name = "DATE")]
    go_live_date: Option<String>,
    #[arg(long = "framework", value_name = "FRAMEWORK")]
    framework_version: Option<String>,
    /// Released flag (true or false)
    #[arg(long, value_name = "BOOL")]
    released: Option<bool>,
    /// Print the stored release as JSON
    #[arg(long)]
    json: bool,
  },

  /// Remove a release
  Delete {
    /// Id of the release to remove
    id: String,
  },

  /// Release counts, latest version and next go-live date
  Summary {
    /// Output the summary in JSON format
    #[arg(long)]
    json: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn init_logging(verbose: u8) {
  let default_level = match verbose {
    0 => "warn",
    1 => "info",
    _ => "debug",
  };
  tracing_subscriber::fmt()
    .with_env_filter(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("release_board={}", default_level).into()),
    )
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();
}

fn main() {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  let cwd = match std::env::current_dir() {
    Ok(dir) => dir,
    Err(e) => {
      eprintln!("Error: Failed to get current directory: {}", e);
      std::process::exit(1);
    }
  };

  // init runs before any board.toml exists
  if let Commands::Init { seed, force } = cli.command {
    if let Err(err) = commands::run_init(&cwd, seed, force) {
      handle_error(err);
    }
    return;
  }

  let ctx = match BoardContext::build(&cwd, cli.config.as_deref()) {
    Ok(ctx) => ctx,
    Err(e) => handle_error(e),
  };

  let result = match cli.command {
    Commands::Init { .. } => Ok(()),
    Commands::Doctor { json } => commands::run_doctor(&ctx, json),

    Commands::List {
      status,
      framework,
      upcoming,
      sort,
      json,
    } => commands::run_list(
      &ctx,
      ListOptions {
        status,
        framework,
        upcoming,
        sort,
        json,
      },
    ),
    Commands::Add {
      main_version,
      go_live_date,
      framework_version,
      released,
      json,
    } => commands::run_add(
      &ctx,
      ReleaseDraft {
        main_version,
        go_live_date,
        framework_version,
        released,
      },
      json,
    ),
    Commands::Edit {
      id,
      main_version,
      go_live_date,
      framework_version,
      released,
      json,
    } => commands::run_edit(
      &ctx,
      id,
      EditFields {
        main_version,
        go_live_date,
        framework_version,
        released,
      },
      json,
    ),
    Commands::Delete { id } => commands::run_delete(&ctx, id),
    Commands::Summary { json } => commands::run_summary(&ctx, json),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: BoardError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
