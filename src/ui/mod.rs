//! Terminal rendering

pub mod table;
