//! Application constants for the county health pipeline
//!
//! This module contains the fixed dataset location, format thresholds and
//! default values used throughout the application.

// =============================================================================
// Dataset Source
// =============================================================================

/// Fixed remote location of the County Health Rankings CSV dataset
pub const DATASET_URL: &str =
    "https://public.tableau.com/app/sample-data/County_Health_Rankings.csv";

/// User agent sent with dataset fetch requests
pub const HTTP_USER_AGENT: &str = concat!("county_health/", env!("CARGO_PKG_VERSION"));

/// Default timeout for a dataset fetch, in seconds
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Dataset Format
// =============================================================================

/// Minimum number of text lines for a usable dataset (header + one data row)
pub const MIN_DATASET_LINES: usize = 2;

/// Schema version of the built-in positional column layout
pub const COLUMN_LAYOUT_VERSION: u32 = 1;
