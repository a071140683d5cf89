//! Tests for county deduplication and the derived lookup indexes

use super::loaded_registry;
use crate::app::models::CountyIdentifier;

#[tokio::test]
async fn test_counties_are_deduplicated_and_sorted() {
    let registry = loaded_registry().await;

    // Albany appears in four records but once as an identity; the row with an
    // empty county name contributes no identity at all.
    let names: Vec<&str> = registry
        .counties()
        .iter()
        .map(|county| county.county.as_str())
        .collect();

    assert_eq!(names, vec!["Albany", "Bexar", "Jefferson", "Travis"]);
}

#[tokio::test]
async fn test_empty_county_rows_keep_records_but_not_identities() {
    let registry = loaded_registry().await;

    assert_eq!(registry.record_count(), 8);
    assert_eq!(registry.county_count(), 4);
}

#[tokio::test]
async fn test_counties_in_state_exact_match() {
    let registry = loaded_registry().await;

    let texas = registry.counties_in_state("Texas");
    assert_eq!(texas.len(), 2);
    assert_eq!(texas[0], CountyIdentifier::new("Bexar", "Texas"));
    assert_eq!(texas[1], CountyIdentifier::new("Travis", "Texas"));

    // State lookup is exact and case-sensitive.
    assert!(registry.counties_in_state("texas").is_empty());
    assert!(registry.counties_in_state("Ohio").is_empty());
}

#[tokio::test]
async fn test_token_index_matches_whole_words() {
    let registry = loaded_registry().await;

    let albany = registry.counties_matching_token("albany");
    assert_eq!(albany.len(), 1);
    assert_eq!(albany[0].county, "Albany");

    // State words are indexed too: "new" and "york" both resolve Albany.
    let new = registry.counties_matching_token("new");
    assert_eq!(new.len(), 1);
    assert_eq!(new[0].county, "Albany");

    // Tokens are whole words, not substrings.
    assert!(registry.counties_matching_token("alb").is_empty());

    // The query token is lowercased before lookup.
    let upper = registry.counties_matching_token("ALBANY");
    assert_eq!(upper.len(), 1);
}
