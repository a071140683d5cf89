//! County and record query surface
//!
//! Filtering is pull-based: callers build a filter value and ask for the
//! derived view, which is recomputed on demand. Nothing is recomputed as a
//! side effect of assignment.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use super::CountyRegistry;
use crate::app::models::{CountyIdentifier, HealthRecord};

/// Filter over the deduplicated county list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountyFilter {
    /// Exact, case-sensitive state name
    pub state: Option<String>,

    /// Free-text search; lowercased and split on whitespace into terms, all
    /// of which must be substrings of the lowercase "county state" name
    pub search: Option<String>,
}

impl CountyFilter {
    /// Filter by exact state name
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Filter by free-text search
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
}

/// Value-range predicate over a record's raw value
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum ValueRange {
    /// Admit every value
    #[default]
    All,

    /// Admit values strictly greater than the threshold
    Above(f64),

    /// Admit values strictly less than the threshold
    Below(f64),
}

impl ValueRange {
    /// Whether the predicate admits the given value
    pub fn admits(&self, value: f64) -> bool {
        match self {
            Self::All => true,
            Self::Above(threshold) => value > *threshold,
            Self::Below(threshold) => value < *threshold,
        }
    }

    /// Human-readable description for display
    pub fn describe(&self) -> String {
        match self {
            Self::All => "all values".to_string(),
            Self::Above(threshold) => format!("above {}", threshold),
            Self::Below(threshold) => format!("below {}", threshold),
        }
    }
}

/// Filter over one county's record set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    /// Exact measure name
    pub measure_name: Option<String>,

    /// Exact year span label
    pub year_span: Option<String>,

    /// Raw-value predicate
    pub value_range: ValueRange,
}

impl RecordFilter {
    /// Filter by exact measure name
    pub fn with_measure(mut self, measure: impl Into<String>) -> Self {
        self.measure_name = Some(measure.into());
        self
    }

    /// Filter by exact year span
    pub fn with_year_span(mut self, year_span: impl Into<String>) -> Self {
        self.year_span = Some(year_span.into());
        self
    }

    /// Filter by value range
    pub fn with_value_range(mut self, range: ValueRange) -> Self {
        self.value_range = range;
        self
    }

    fn matches(&self, record: &HealthRecord) -> bool {
        if let Some(ref measure) = self.measure_name {
            if record.measure_name != *measure {
                return false;
            }
        }

        if let Some(ref year_span) = self.year_span {
            if record.year_span != *year_span {
                return false;
            }
        }

        self.value_range.admits(record.raw_value)
    }
}

/// Ordering for value-ranked record lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Dataset-level summary statistics
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct DatasetStatistics {
    pub total_records: usize,
    pub unique_counties: usize,
    pub unique_states: usize,
    pub unique_measures: usize,
    pub min_value: f64,
    pub max_value: f64,
}

impl CountyRegistry {
    /// Derive the filtered county list
    ///
    /// Starting from the full deduplicated set: an optional exact state
    /// filter (served from the state index), then an optional conjunctive
    /// substring search. Neither step reorders — the result stays county
    /// ascending. An unknown state or a search with no matches yields an
    /// empty list, never an error; empty search text is a no-op.
    pub fn filter_counties(&self, filter: &CountyFilter) -> Vec<CountyIdentifier> {
        let mut result: Vec<CountyIdentifier> = match &filter.state {
            Some(state) => self.counties_in_state(state),
            None => self.unique_counties.clone(),
        };

        if let Some(search) = filter.search.as_deref() {
            let terms: Vec<String> = search
                .to_lowercase()
                .split_whitespace()
                .map(str::to_string)
                .collect();

            if !terms.is_empty() {
                result.retain(|county| {
                    let text = county.search_text();
                    terms.iter().all(|term| text.contains(term.as_str()))
                });
            }
        }

        result
    }

    /// Sorted unique state names across the record set
    pub fn available_states(&self) -> Vec<String> {
        let states: BTreeSet<String> = self
            .records
            .iter()
            .map(|record| record.state.clone())
            .collect();
        states.into_iter().collect()
    }

    /// All records for a county, through the per-county cache
    ///
    /// The subset is computed on first access and memoized; repeated calls
    /// return the same shared vector without another pass over the dataset.
    pub fn county_records(&self, id: &CountyIdentifier) -> Arc<Vec<HealthRecord>> {
        self.cache_lock().county_records(id, &self.records)
    }

    /// A county's records narrowed by measure, year span and value range
    ///
    /// Sorted by year span ascending. The sort is lexicographic, not
    /// calendar-aware; it orders correctly only while span labels share
    /// length and digit layout.
    pub fn filtered_county_records(
        &self,
        id: &CountyIdentifier,
        filter: &RecordFilter,
    ) -> Vec<HealthRecord> {
        let base = self.county_records(id);
        let mut result: Vec<HealthRecord> = base
            .iter()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect();

        result.sort_by(|a, b| a.year_span.cmp(&b.year_span));
        result
    }

    /// Sorted unique measure names present for a county
    pub fn available_measures(&self, id: &CountyIdentifier) -> Vec<String> {
        let measures: BTreeSet<String> = self
            .county_records(id)
            .iter()
            .map(|record| record.measure_name.clone())
            .collect();
        measures.into_iter().collect()
    }

    /// Sorted unique year spans present for a county
    pub fn available_year_spans(&self, id: &CountyIdentifier) -> Vec<String> {
        let spans: BTreeSet<String> = self
            .county_records(id)
            .iter()
            .map(|record| record.year_span.clone())
            .collect();
        spans.into_iter().collect()
    }

    /// Rank records by raw value in the given order
    pub fn rank_records_by_value(records: &[HealthRecord], order: SortOrder) -> Vec<HealthRecord> {
        let mut ranked = records.to_vec();
        ranked.sort_by(|a, b| {
            let ordering = a
                .raw_value
                .partial_cmp(&b.raw_value)
                .unwrap_or(Ordering::Equal);
            match order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });
        ranked
    }

    /// Group all records by their "County, State" display title
    pub fn group_records_by_county(&self) -> HashMap<String, Vec<&HealthRecord>> {
        let mut groups: HashMap<String, Vec<&HealthRecord>> = HashMap::new();
        for record in self.records.iter() {
            groups.entry(record.display_title()).or_default().push(record);
        }
        groups
    }

    /// Dataset-level summary statistics
    pub fn statistics(&self) -> DatasetStatistics {
        if self.records.is_empty() {
            return DatasetStatistics::default();
        }

        let mut min_value = f64::INFINITY;
        let mut max_value = f64::NEG_INFINITY;
        let mut measures: BTreeSet<&str> = BTreeSet::new();

        for record in self.records.iter() {
            min_value = min_value.min(record.raw_value);
            max_value = max_value.max(record.raw_value);
            measures.insert(record.measure_name.as_str());
        }

        DatasetStatistics {
            total_records: self.records.len(),
            unique_counties: self.unique_counties.len(),
            unique_states: self.state_index.len(),
            unique_measures: measures.len(),
            min_value,
            max_value,
        }
    }
}
