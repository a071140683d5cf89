//! County registry service owning the session's record set and indexes
//!
//! The registry is the authoritative in-memory holder of the parsed dataset
//! for a session. It loads records through a [`DatasetSource`], deduplicates
//! the `(county, state)` identifiers, builds the word-token and state lookup
//! indexes once per load, and answers county-list and per-county record
//! queries. Parsed data is shared between sessions through a
//! [`DatasetCache`](crate::app::services::dataset_cache::DatasetCache).

use std::collections::{HashMap, HashSet};
use std::sync::MutexGuard;
use std::time::Instant;

use crate::app::models::{CountyIdentifier, HealthRecord};
use crate::app::services::dataset_cache::{DatasetCache, SharedDatasetCache};
use crate::app::services::dataset_source::{DatasetSource, HttpDatasetSource};
use crate::config::Config;
use crate::Result;

pub mod indexing;
pub mod loader;
pub mod metadata;
pub mod query;

#[cfg(test)]
pub mod tests;

// Re-export key types for convenience
pub use metadata::{LoadStats, RegistryMetadata};
pub use query::{CountyFilter, DatasetStatistics, RecordFilter, SortOrder, ValueRange};

/// County registry providing indexed county browsing and filtering
///
/// Invariant: the indexes are rebuilt before any load call returns, so a
/// query can never observe records without matching indexes.
#[derive(Debug)]
pub struct CountyRegistry {
    /// Parsed record set for the current session (shared with the cache)
    pub(crate) records: std::sync::Arc<Vec<HealthRecord>>,

    /// Deduplicated county identifiers, sorted county ascending
    pub(crate) unique_counties: Vec<CountyIdentifier>,

    /// Lowercase word token -> counties whose "county state" contains it
    pub(crate) search_index: HashMap<String, HashSet<CountyIdentifier>>,

    /// Exact state name -> counties in that state
    pub(crate) state_index: HashMap<String, HashSet<CountyIdentifier>>,

    /// Pipeline configuration
    pub(crate) config: Config,

    /// Transport for the raw dataset bytes
    pub(crate) source: Box<dyn DatasetSource>,

    /// Dataset cache shared between sessions
    pub(crate) cache: SharedDatasetCache,

    /// Guard flag making concurrent load calls no-ops
    pub(crate) is_loading: bool,

    /// Whether a load has completed successfully for this session
    pub(crate) loaded: bool,

    /// Timestamp of the last completed load
    pub(crate) load_time: Instant,
}

impl CountyRegistry {
    /// Create a registry with an explicit source and shared cache
    pub fn new(config: Config, source: Box<dyn DatasetSource>, cache: SharedDatasetCache) -> Self {
        Self {
            records: std::sync::Arc::new(Vec::new()),
            unique_counties: Vec::new(),
            search_index: HashMap::new(),
            state_index: HashMap::new(),
            config,
            source,
            cache,
            is_loading: false,
            loaded: false,
            load_time: Instant::now(),
        }
    }

    /// Create a registry fetching over HTTPS with its own fresh cache
    pub fn from_config(config: Config) -> Result<Self> {
        config.validate()?;
        let source = Box::new(HttpDatasetSource::new(&config)?);
        Ok(Self::new(config, source, DatasetCache::shared()))
    }

    /// All records of the current dataset
    pub fn records(&self) -> &[HealthRecord] {
        &self.records
    }

    /// Number of records in the current dataset
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Deduplicated counties in presentation order (county ascending)
    pub fn counties(&self) -> &[CountyIdentifier] {
        &self.unique_counties
    }

    /// Number of unique counties
    pub fn county_count(&self) -> usize {
        self.unique_counties.len()
    }

    /// Whether a load is currently in flight
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Whether a load has completed successfully
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Get registry metadata
    pub fn metadata(&self) -> RegistryMetadata {
        RegistryMetadata {
            source: self.source.describe(),
            record_count: self.records.len(),
            county_count: self.unique_counties.len(),
            state_count: self.state_index.len(),
            generation: self.cache_lock().generation(),
            loaded: self.loaded,
            load_time: self.load_time,
        }
    }

    /// Lock the shared cache, recovering from a poisoned mutex
    pub(crate) fn cache_lock(&self) -> MutexGuard<'_, DatasetCache> {
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
