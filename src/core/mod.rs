//! Core plumbing shared by every command
//!
//! - **config**: board.toml parsing and validation
//! - **context**: resolved configuration and store construction
//! - **error**: error types with exit codes and help messages

pub mod config;
pub mod context;
pub mod error;
