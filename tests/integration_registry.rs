//! Integration tests for the county registry pipeline through the public API
//!
//! These tests exercise the full path a session takes: read a dataset from a
//! local file, parse it into records, build the county indexes, and answer
//! browsing and filtering queries, including cache reuse across sessions.

use std::path::PathBuf;
use std::sync::Arc;

use county_health::app::services::county_registry::{CountyFilter, RecordFilter, ValueRange};
use county_health::app::services::dataset_cache::DatasetCache;
use county_health::app::services::dataset_source::FileDatasetSource;
use county_health::{Config, CountyIdentifier, CountyRegistry};
use tempfile::TempDir;

const SAMPLE_DATASET: &str = "\
State,County,State code,County code,Year span,Measure name,Measure id,Release year,County rank,Raw value
New York,Albany,36,001,2014-2018,Adult obesity,11,2019,12,27.5
New York,Albany,36,001,2009-2013,Adult obesity,11,2014,15,25.1
New York,Albany,36,001,2014-2018,Adult smoking,9,2019,8,14.9
Texas,Travis,48,453,2014-2018,Adult obesity,11,2019,30,31.1
Texas,Bexar,48,029,2014-2018,Adult obesity,11,2019,41,33.8
Dallas,Jefferson,01,073,2014-2018,Adult obesity,11,2019,22,29.0
";

fn write_dataset(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("rankings.csv");
    std::fs::write(&path, SAMPLE_DATASET).expect("Failed to write sample dataset");
    path
}

fn registry_for(path: &PathBuf) -> CountyRegistry {
    CountyRegistry::new(
        Config::default(),
        Box::new(FileDatasetSource::new(path)),
        DatasetCache::shared(),
    )
}

#[tokio::test]
async fn test_end_to_end_load_and_browse() {
    let dir = TempDir::new().unwrap();
    let path = write_dataset(&dir);

    let mut registry = registry_for(&path);
    let stats = registry.load().await;

    assert!(!stats.has_errors(), "load failed: {:?}", stats.errors);
    assert_eq!(stats.records_parsed, 6);
    assert_eq!(registry.record_count(), 6);
    assert_eq!(registry.county_count(), 4);

    // Browse: full list is county ascending.
    let all = registry.filter_counties(&CountyFilter::default());
    let names: Vec<&str> = all.iter().map(|c| c.county.as_str()).collect();
    assert_eq!(names, vec!["Albany", "Bexar", "Jefferson", "Travis"]);

    // Narrow by state, then by search text.
    let filter = CountyFilter::default().with_state("Texas").with_search("tra");
    let texas = registry.filter_counties(&filter);
    assert_eq!(texas, vec![CountyIdentifier::new("Travis", "Texas")]);
}

#[tokio::test]
async fn test_county_detail_flow() {
    let dir = TempDir::new().unwrap();
    let path = write_dataset(&dir);

    let mut registry = registry_for(&path);
    registry.load().await;

    let albany = CountyIdentifier::new("Albany", "New York");

    // First access scans the dataset, second is served from the cache.
    let records = registry.county_records(&albany);
    let again = registry.county_records(&albany);
    assert_eq!(records.len(), 3);
    assert!(Arc::ptr_eq(&records, &again));

    // Detail filters: measure narrows to the obesity history, value range
    // comparisons are strict.
    let obesity = RecordFilter::default().with_measure("Adult obesity");
    let history = registry.filtered_county_records(&albany, &obesity);
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].year_span, "2009-2013");

    let above = obesity.clone().with_value_range(ValueRange::Above(27.5));
    assert!(registry.filtered_county_records(&albany, &above).is_empty());

    let below = obesity.with_value_range(ValueRange::Below(27.5));
    let lower = registry.filtered_county_records(&albany, &below);
    assert_eq!(lower.len(), 1);
    assert!((lower[0].raw_value - 25.1).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_sessions_share_cached_dataset() {
    let dir = TempDir::new().unwrap();
    let path = write_dataset(&dir);
    let cache = DatasetCache::shared();

    let mut first = CountyRegistry::new(
        Config::default(),
        Box::new(FileDatasetSource::new(&path)),
        cache.clone(),
    );
    first.load().await;

    // The second session points at a path that no longer exists; it must be
    // served entirely from the shared cache.
    std::fs::remove_file(&path).unwrap();

    let mut second = CountyRegistry::new(
        Config::default(),
        Box::new(FileDatasetSource::new(&path)),
        cache,
    );
    let stats = second.load().await;

    assert!(stats.from_cache);
    assert!(!stats.has_errors());
    assert_eq!(second.record_count(), first.record_count());
    assert_eq!(second.county_count(), 4);
}

#[tokio::test]
async fn test_missing_dataset_collapses_to_empty_session() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.csv");

    let mut registry = registry_for(&path);
    let stats = registry.load().await;

    assert!(stats.has_errors());
    assert!(!registry.is_loaded());
    assert_eq!(registry.record_count(), 0);

    // Queries on the empty session answer empty, never panic.
    assert!(registry.filter_counties(&CountyFilter::default()).is_empty());
    assert!(registry.available_states().is_empty());
}
