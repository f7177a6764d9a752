//! Integration tests for release-board
//!
//! Each test drives the compiled binary inside its own temporary directory.

mod helpers;
mod test_doctor;
mod test_init;
mod test_list;
mod test_records;
