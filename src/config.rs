//! Configuration management and validation.
//!
//! Provides the pipeline configuration (dataset location, fetch behavior) and
//! the named, versioned column layout that replaces magic positional indices
//! in the CSV transformer.

use crate::constants::{COLUMN_LAYOUT_VERSION, DATASET_URL, DEFAULT_FETCH_TIMEOUT_SECS};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Positional column layout of the County Health Rankings CSV schema
///
/// The dataset is a positional contract: each field of a record is identified
/// by its column index, not its header name. The layout is versioned so that a
/// schema change in the upstream dataset is an explicit configuration change
/// rather than a silent reinterpretation of the same indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnLayout {
    /// Version of this layout, bumped when the upstream schema changes
    pub schema_version: u32,

    /// State name column
    pub state: usize,

    /// County name column
    pub county: usize,

    /// Two-digit state code column
    pub state_code: usize,

    /// County code column (doubles as the FIPS code)
    pub county_code: usize,

    /// Year span label column (e.g. "2014-2018")
    pub year_span: usize,

    /// Measure name column
    pub measure_name: usize,

    /// Release year column
    pub release_year: usize,

    /// Raw numeric value column
    pub raw_value: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            schema_version: COLUMN_LAYOUT_VERSION,
            state: 0,
            county: 1,
            state_code: 2,
            county_code: 3,
            year_span: 4,
            measure_name: 5,
            release_year: 7,
            raw_value: 9,
        }
    }
}

impl ColumnLayout {
    /// Minimum number of columns a row must have to be mapped by this layout
    pub fn min_columns(&self) -> usize {
        let highest = [
            self.state,
            self.county,
            self.state_code,
            self.county_code,
            self.year_span,
            self.measure_name,
            self.release_year,
            self.raw_value,
        ]
        .into_iter()
        .max()
        .unwrap_or(0);

        highest + 1
    }
}

/// Global configuration for the county health pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Remote location of the CSV dataset
    pub dataset_url: String,

    /// Timeout for a dataset fetch, in seconds (0 disables the timeout)
    pub fetch_timeout_secs: u64,

    /// Positional column layout of the dataset
    pub columns: ColumnLayout,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset_url: DATASET_URL.to_string(),
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            columns: ColumnLayout::default(),
        }
    }
}

impl Config {
    /// Create configuration with a custom dataset URL
    pub fn with_dataset_url(mut self, url: impl Into<String>) -> Self {
        self.dataset_url = url.into();
        self
    }

    /// Create configuration with a custom fetch timeout
    pub fn with_fetch_timeout_secs(mut self, secs: u64) -> Self {
        self.fetch_timeout_secs = secs;
        self
    }

    /// Create configuration with a custom column layout
    pub fn with_columns(mut self, columns: ColumnLayout) -> Self {
        self.columns = columns;
        self
    }

    /// Validate the configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.dataset_url.trim().is_empty() {
            return Err(Error::configuration("dataset URL cannot be empty"));
        }

        Ok(())
    }
}
