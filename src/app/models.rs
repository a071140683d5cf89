//! Data models for the county health pipeline
//!
//! This module contains the core data structures for representing county
//! health observations and the derived county identity used for deduplication
//! and list presentation.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

// =============================================================================
// Health Record
// =============================================================================

/// One observation from the County Health Rankings dataset
///
/// A record is a single time-series point: `(county, state)` identify the
/// geographic entity, `measure_name` plus `year_span` identify the point for
/// that entity. Records are immutable once constructed; there is no update or
/// deletion path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthRecord {
    /// Opaque record identity, stable within one dataset parse
    pub id: u64,

    /// Full state name (e.g. "New York")
    pub state: String,

    /// County name without the "County" suffix (e.g. "Albany")
    pub county: String,

    /// Two-digit state code
    pub state_code: String,

    /// County code within the state
    pub county_code: String,

    /// Multi-year aggregation window label (e.g. "2014-2018")
    pub year_span: String,

    /// Free-text measure category (e.g. "Adult obesity")
    pub measure_name: String,

    /// Numeric observation value; 0.0 when the source field was unparsable
    pub raw_value: f64,

    /// Year the observation was released
    pub release_year: String,

    /// FIPS code identifying the county (duplicate of `county_code` in the
    /// source schema)
    pub fips_code: String,
}

impl HealthRecord {
    /// Presentation title in "County, State" form
    pub fn display_title(&self) -> String {
        format!("{}, {}", self.county, self.state)
    }

    /// The county identity this record belongs to
    pub fn county_identifier(&self) -> CountyIdentifier {
        CountyIdentifier::new(&self.county, &self.state)
    }
}

// =============================================================================
// County Identifier
// =============================================================================

/// Derived key identifying a geographic entity: a `(county, state)` pair
///
/// Equality and hashing cover both fields. Ordering is by county name first,
/// then state, which fixes the presentation order of deduplicated county
/// lists to county ascending with a deterministic tie-break.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CountyIdentifier {
    /// County name
    pub county: String,

    /// Full state name
    pub state: String,
}

impl CountyIdentifier {
    /// Create a new county identifier
    pub fn new(county: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            county: county.into(),
            state: state.into(),
        }
    }

    /// Lowercase "county state" concatenation used for token indexing and
    /// substring search
    pub fn search_text(&self) -> String {
        format!("{} {}", self.county, self.state).to_lowercase()
    }

    /// Presentation title in "County, State" form
    pub fn display_title(&self) -> String {
        format!("{}, {}", self.county, self.state)
    }
}

impl Ord for CountyIdentifier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.county
            .cmp(&other.county)
            .then_with(|| self.state.cmp(&other.state))
    }
}

impl PartialOrd for CountyIdentifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CountyIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.county, self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn record(county: &str, state: &str) -> HealthRecord {
        HealthRecord {
            id: 0,
            state: state.to_string(),
            county: county.to_string(),
            state_code: "36".to_string(),
            county_code: "001".to_string(),
            year_span: "2014-2018".to_string(),
            measure_name: "Adult obesity".to_string(),
            raw_value: 27.5,
            release_year: "2019".to_string(),
            fips_code: "001".to_string(),
        }
    }

    #[test]
    fn test_display_title() {
        let r = record("Albany", "New York");
        assert_eq!(r.display_title(), "Albany, New York");
        assert_eq!(r.county_identifier().display_title(), "Albany, New York");
    }

    #[test]
    fn test_identifier_equality_covers_both_fields() {
        let a = CountyIdentifier::new("Washington", "Ohio");
        let b = CountyIdentifier::new("Washington", "Iowa");
        let c = CountyIdentifier::new("Washington", "Ohio");

        assert_ne!(a, b);
        assert_eq!(a, c);

        let set: HashSet<_> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_identifier_ordering_is_county_then_state() {
        let mut ids = vec![
            CountyIdentifier::new("Washington", "Ohio"),
            CountyIdentifier::new("Albany", "New York"),
            CountyIdentifier::new("Washington", "Iowa"),
        ];
        ids.sort();

        assert_eq!(ids[0].county, "Albany");
        assert_eq!(ids[1], CountyIdentifier::new("Washington", "Iowa"));
        assert_eq!(ids[2], CountyIdentifier::new("Washington", "Ohio"));
    }

    #[test]
    fn test_search_text_is_lowercase_concatenation() {
        let id = CountyIdentifier::new("Jefferson", "Dallas");
        assert_eq!(id.search_text(), "jefferson dallas");
    }
}
