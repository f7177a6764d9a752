//! CLI commands for release-board
//!
//! ## Setup & Inspection
//! - **init**: write board.toml, optionally seed the store file
//! - **doctor**: configuration, API key and store health checks
//!
//! ## Records
//! - **list**: filtered, sorted table or JSON
//! - **records**: add, edit and delete single releases
//! - **summary**: release counts and latest version
//!
//! Every command except `init` takes `&BoardContext` and opens its own store.

pub mod doctor;
pub mod init;
pub mod list;
pub mod records;
pub mod summary;

pub use doctor::run_doctor;
pub use init::run_init;
pub use list::{ListOptions, StatusFilter, run_list};
pub use records::{EditFields, run_add, run_delete, run_edit};
pub use summary::run_summary;
