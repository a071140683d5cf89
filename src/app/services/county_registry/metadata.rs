//! Load statistics and registry metadata

use std::time::{Duration, Instant};

/// Statistics about one registry load call
#[derive(Debug, Clone)]
pub struct LoadStats {
    /// Whether the dataset was served from the shared cache without a fetch
    pub from_cache: bool,

    /// Whether the call was a no-op because a load was already in flight
    pub skipped_in_flight: bool,

    /// Number of data rows encountered by the transformer
    pub rows_seen: usize,

    /// Number of records parsed into the dataset
    pub records_parsed: usize,

    /// Number of rows dropped for a schema mismatch
    pub rows_dropped: usize,

    /// Number of unique counties indexed
    pub counties_indexed: usize,

    /// Number of states indexed
    pub states_indexed: usize,

    /// Time taken by the load call
    pub load_duration: Duration,

    /// Any errors encountered; a non-empty list means the load collapsed to
    /// an empty dataset
    pub errors: Vec<String>,
}

impl LoadStats {
    /// Create new empty load statistics
    pub fn new() -> Self {
        Self {
            from_cache: false,
            skipped_in_flight: false,
            rows_seen: 0,
            records_parsed: 0,
            rows_dropped: 0,
            counties_indexed: 0,
            states_indexed: 0,
            load_duration: Duration::ZERO,
            errors: Vec::new(),
        }
    }

    /// Statistics for a call skipped because a load was already in flight
    pub fn in_flight() -> Self {
        Self {
            skipped_in_flight: true,
            ..Self::new()
        }
    }

    /// Check if any errors occurred during loading
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Get a summary string of the load
    pub fn summary(&self) -> String {
        if self.skipped_in_flight {
            return "Load skipped: already in flight".to_string();
        }

        let origin = if self.from_cache { "cache" } else { "source" };
        format!(
            "Loaded {} records from {} ({} counties, {} states, {} rows dropped) in {:.2}s",
            self.records_parsed,
            origin,
            self.counties_indexed,
            self.states_indexed,
            self.rows_dropped,
            self.load_duration.as_secs_f64()
        )
    }
}

impl Default for LoadStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Metadata about the county registry
#[derive(Debug, Clone)]
pub struct RegistryMetadata {
    /// Description of the dataset source (URL or file path)
    pub source: String,

    /// Number of records in the registry
    pub record_count: usize,

    /// Number of unique counties
    pub county_count: usize,

    /// Number of states with at least one county
    pub state_count: usize,

    /// Dataset generation of the shared cache
    pub generation: u64,

    /// Whether a load has completed successfully
    pub loaded: bool,

    /// When the registry last completed a load
    pub load_time: Instant,
}

impl RegistryMetadata {
    /// Get the age of the registry since the last load
    pub fn age(&self) -> Duration {
        self.load_time.elapsed()
    }

    /// Get a summary string of the registry
    pub fn summary(&self) -> String {
        format!(
            "Registry with {} records across {} counties in {} states (generation {})",
            self.record_count, self.county_count, self.state_count, self.generation
        )
    }
}
