//! Registry loading
//!
//! `load()` is idempotent with respect to both re-entrancy and repetition: a
//! call while a load is in flight is a no-op, and once the shared cache holds
//! the dataset no further fetch is performed. A fetch or parse failure never
//! escapes the call — it is reported to the operator log, recorded in the
//! returned statistics and collapses the session to an empty record set. No
//! partial dataset is ever installed.

use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

use super::CountyRegistry;
use super::metadata::LoadStats;
use crate::Result;
use crate::app::models::HealthRecord;
use crate::app::services::transformer;

impl CountyRegistry {
    /// Load the dataset, reusing the shared cache when possible
    ///
    /// The indexes are rebuilt before this call returns, so queries issued
    /// after `load()` never observe stale or absent indexes.
    pub async fn load(&mut self) -> LoadStats {
        if self.is_loading {
            debug!("Load already in flight, ignoring call");
            return LoadStats::in_flight();
        }

        self.is_loading = true;
        let stats = self.load_inner().await;
        self.is_loading = false;

        stats
    }

    /// Drop the cached dataset and load again from the source
    ///
    /// Per-county cache entries of the previous dataset generation are
    /// discarded, so stale subsets can never be served after a reload.
    pub async fn reload(&mut self) -> LoadStats {
        self.cache_lock().invalidate_dataset();
        self.loaded = false;
        self.load().await
    }

    async fn load_inner(&mut self) -> LoadStats {
        let start = Instant::now();
        let mut stats = LoadStats::new();

        let cached = self.cache_lock().dataset();
        if let Some(records) = cached {
            stats.from_cache = true;
            stats.records_parsed = records.len();
            self.install(records, &mut stats);
            stats.load_duration = start.elapsed();
            info!("{}", stats.summary());
            return stats;
        }

        match self.fetch_and_parse(&mut stats).await {
            Ok(records) => {
                let shared = self.cache_lock().store_dataset(records);
                self.install(shared, &mut stats);
            }
            Err(e) => {
                // Failure collapses to an empty dataset; the error is visible
                // to operators only, never to query callers.
                error!("Dataset load failed: {}", e);
                stats.errors.push(e.to_string());
                self.install(Arc::new(Vec::new()), &mut stats);
                self.loaded = false;
            }
        }

        stats.load_duration = start.elapsed();
        info!("{}", stats.summary());
        stats
    }

    async fn fetch_and_parse(&self, stats: &mut LoadStats) -> Result<Vec<HealthRecord>> {
        let bytes = self.source.fetch().await?;
        let result = transformer::transform_with_stats(&bytes, &self.config.columns)?;

        stats.rows_seen = result.stats.rows_seen;
        stats.records_parsed = result.stats.records_parsed;
        stats.rows_dropped = result.stats.rows_dropped;

        Ok(result.records)
    }

    /// Install a record set and rebuild the derived indexes
    fn install(&mut self, records: Arc<Vec<HealthRecord>>, stats: &mut LoadStats) {
        self.records = records;
        self.rebuild_indexes();
        self.loaded = true;
        self.load_time = Instant::now();

        stats.counties_indexed = self.unique_counties.len();
        stats.states_indexed = self.state_index.len();
    }
}
