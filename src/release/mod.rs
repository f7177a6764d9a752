//! Release records and the list operations built on them
//!
//! # Core Invariants
//!
//! 1. **Ids are unique within a list**
//!    - Fetched records keep their store id
//!    - New records get a millisecond timestamp id, bumped past collisions
//!
//! 2. **Versions compare numerically, segment by segment**
//!    - `2.10` sorts above `2.9`
//!    - Missing trailing segments are 0, so `2.1` equals `2.1.0`
//!
//! 3. **Queries never mutate their input**
//!    - Filters and sorts return new vectors
//!    - Sorting is stable: ties keep input order
//!
//! # Layout
//!
//! - **model**: `SoftwareRelease`, remote ingestion, drafts, fallback data
//! - **query**: filter/sort/search predicates and summaries

pub mod model;
pub mod query;

pub use model::{ReleaseDraft, RemoteRelease, SoftwareRelease, fallback_releases, generate_id, ingest};
