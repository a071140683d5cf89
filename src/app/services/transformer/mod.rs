//! CSV transformer for the County Health Rankings dataset
//!
//! This module turns the raw dataset bytes into typed [`HealthRecord`]s. The
//! transform is a pure function: no I/O, deterministic for identical input
//! bytes.
//!
//! The dataset is a positional, comma-delimited format with no quoting or
//! escaping. The parser maps each retained row through the named
//! [`ColumnLayout`](crate::config::ColumnLayout) configuration; rows whose
//! field count does not match the header are dropped silently and counted in
//! the returned statistics.
//!
//! [`HealthRecord`]: crate::app::models::HealthRecord

pub mod parser;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use parser::{transform, transform_with_stats};
pub use stats::{ParseResult, ParseStats};
