//! Shared fixtures and mock sources for county registry tests

use futures::future::BoxFuture;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::app::services::county_registry::CountyRegistry;
use crate::app::services::dataset_cache::{DatasetCache, SharedDatasetCache};
use crate::app::services::dataset_source::DatasetSource;
use crate::config::Config;
use crate::{Error, Result};

pub mod indexing_tests;

/// Header row matching the default column layout (10 columns)
pub const SAMPLE_HEADER: &str =
    "State,County,State code,County code,Year span,Measure name,Measure id,Release year,County rank,Raw value";

/// A small dataset covering several states, measures and year spans
///
/// The final row has an empty county name and must not surface as a county
/// identity even though the record itself is retained.
pub fn sample_csv() -> String {
    format!(
        "{}\n\
         New York,Albany,36,1,2014-2018,Adult obesity,11,2019,5,27.5\n\
         New York,Albany,36,1,2009-2013,Adult obesity,11,2014,7,25.1\n\
         New York,Albany,36,1,2014-2018,Adult smoking,9,2019,6,14.9\n\
         New York,Albany,36,1,2014-2018,Premature death,1,2019,2,61.0\n\
         Texas,Travis,48,453,2014-2018,Adult obesity,11,2019,12,31.1\n\
         Texas,Bexar,48,29,2014-2018,Adult obesity,11,2019,30,33.8\n\
         Dallas,Jefferson,10,3,2014-2018,Adult obesity,11,2019,3,29.0\n\
         New York,,36,999,2014-2018,Adult obesity,11,2019,9,20.0\n",
        SAMPLE_HEADER
    )
}

/// In-memory source counting how many times it is fetched
#[derive(Debug)]
pub struct CountingSource {
    data: Vec<u8>,
    fetches: Arc<AtomicUsize>,
}

impl CountingSource {
    pub fn new(data: Vec<u8>) -> (Self, Arc<AtomicUsize>) {
        let fetches = Arc::new(AtomicUsize::new(0));
        (
            Self {
                data,
                fetches: fetches.clone(),
            },
            fetches,
        )
    }
}

impl DatasetSource for CountingSource {
    fn fetch(&self) -> BoxFuture<'_, Result<Vec<u8>>> {
        let data = self.data.clone();
        let fetches = self.fetches.clone();
        Box::pin(async move {
            fetches.fetch_add(1, Ordering::SeqCst);
            Ok(data)
        })
    }

    fn describe(&self) -> String {
        "counting test source".to_string()
    }
}

/// Source that always fails with a fetch error
#[derive(Debug)]
pub struct FailingSource;

impl DatasetSource for FailingSource {
    fn fetch(&self) -> BoxFuture<'_, Result<Vec<u8>>> {
        Box::pin(async { Err(Error::fetch("test source", "transport down", None)) })
    }

    fn describe(&self) -> String {
        "failing test source".to_string()
    }
}

/// Build a registry over a counting source with a fresh shared cache
pub fn registry_with_counting_source(data: Vec<u8>) -> (CountyRegistry, Arc<AtomicUsize>) {
    registry_with_shared_cache(data, DatasetCache::shared())
}

/// Build a registry over a counting source against an existing cache
pub fn registry_with_shared_cache(
    data: Vec<u8>,
    cache: SharedDatasetCache,
) -> (CountyRegistry, Arc<AtomicUsize>) {
    let (source, fetches) = CountingSource::new(data);
    let registry = CountyRegistry::new(Config::default(), Box::new(source), cache);
    (registry, fetches)
}

/// Build and load a registry over the sample dataset
pub async fn loaded_registry() -> CountyRegistry {
    let (mut registry, _) = registry_with_counting_source(sample_csv().into_bytes());
    let stats = registry.load().await;
    assert!(!stats.has_errors(), "sample dataset must load cleanly");
    registry
}
