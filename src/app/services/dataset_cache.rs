//! Dataset and per-county caching
//!
//! The cache is an explicitly constructed object with a defined lifetime:
//! sessions share one [`DatasetCache`] behind an `Arc<Mutex<..>>` instead of
//! a hidden process-wide singleton. It memoizes two things:
//!
//! - the full parsed dataset, stored once per generation and reused by every
//!   registry sharing the cache (a second `load()` never refetches);
//! - per-county record subsets, populated lazily on first access.
//!
//! Storing a new dataset bumps the generation and discards all per-county
//! entries, so a reload can never serve subsets of a previous dataset.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

use crate::app::models::{CountyIdentifier, HealthRecord};

/// Handle for a cache shared between sessions
pub type SharedDatasetCache = Arc<Mutex<DatasetCache>>;

/// Memoized dataset state shared by registry sessions
#[derive(Debug, Default)]
pub struct DatasetCache {
    /// Full parsed dataset for the current generation
    dataset: Option<Arc<Vec<HealthRecord>>>,

    /// Lazily populated per-county record subsets
    county_records: HashMap<CountyIdentifier, Arc<Vec<HealthRecord>>>,

    /// Bumped every time a dataset is stored
    generation: u64,

    /// Number of cold per-county filter passes, for cache-hit diagnostics
    county_scans: usize,
}

/// Snapshot of cache state for reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub generation: u64,
    pub dataset_cached: bool,
    pub cached_counties: usize,
    pub county_scans: usize,
}

impl DatasetCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new cache wrapped for sharing between sessions
    pub fn shared() -> SharedDatasetCache {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Get the cached dataset, if one has been stored
    pub fn dataset(&self) -> Option<Arc<Vec<HealthRecord>>> {
        self.dataset.clone()
    }

    /// Store a freshly parsed dataset and return the shared handle
    ///
    /// Bumps the generation and discards per-county entries of the previous
    /// dataset.
    pub fn store_dataset(&mut self, records: Vec<HealthRecord>) -> Arc<Vec<HealthRecord>> {
        let shared = Arc::new(records);
        self.dataset = Some(shared.clone());
        self.generation += 1;
        self.county_records.clear();

        debug!(
            "Cached dataset generation {} ({} records)",
            self.generation,
            shared.len()
        );
        shared
    }

    /// Get the record subset for a county, computing and memoizing it on
    /// first access
    ///
    /// The subset is filtered from `records` by exact county and state match.
    /// Repeated calls for the same county return the same shared vector
    /// without another filter pass.
    pub fn county_records(
        &mut self,
        id: &CountyIdentifier,
        records: &[HealthRecord],
    ) -> Arc<Vec<HealthRecord>> {
        if let Some(cached) = self.county_records.get(id) {
            return cached.clone();
        }

        self.county_scans += 1;
        let subset: Vec<HealthRecord> = records
            .iter()
            .filter(|record| record.county == id.county && record.state == id.state)
            .cloned()
            .collect();

        let shared = Arc::new(subset);
        self.county_records.insert(id.clone(), shared.clone());
        shared
    }

    /// Drop the cached dataset and all per-county entries
    ///
    /// The next `load()` against this cache fetches again.
    pub fn invalidate_dataset(&mut self) {
        self.dataset = None;
        self.county_records.clear();
    }

    /// Current dataset generation (0 before the first store)
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of cold per-county filter passes performed so far
    pub fn county_scans(&self) -> usize {
        self.county_scans
    }

    /// Snapshot of the cache state
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            generation: self.generation,
            dataset_cached: self.dataset.is_some(),
            cached_counties: self.county_records.len(),
            county_scans: self.county_scans,
        }
    }
}
