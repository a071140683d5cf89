//! Derived index maintenance
//!
//! Two pure lookup caches are rebuilt from the deduplicated county set on
//! every load: a lowercase word-token index over "county state" names, and an
//! exact state-name index. They hold no independent authority over the data.

use std::collections::HashSet;

use super::CountyRegistry;
use crate::app::models::CountyIdentifier;

impl CountyRegistry {
    /// Recompute the deduplicated county set and both indexes
    ///
    /// Records with an empty county or state are excluded from the identity
    /// set. The result is sorted county ascending for presentation order.
    pub(crate) fn rebuild_indexes(&mut self) {
        let mut identifiers: HashSet<CountyIdentifier> = HashSet::new();
        for record in self.records.iter() {
            if record.county.is_empty() || record.state.is_empty() {
                continue;
            }
            identifiers.insert(record.county_identifier());
        }

        let mut unique: Vec<CountyIdentifier> = identifiers.into_iter().collect();
        unique.sort();

        self.search_index.clear();
        self.state_index.clear();

        for county in &unique {
            for word in county.search_text().split_whitespace() {
                self.search_index
                    .entry(word.to_string())
                    .or_default()
                    .insert(county.clone());
            }

            self.state_index
                .entry(county.state.clone())
                .or_default()
                .insert(county.clone());
        }

        self.unique_counties = unique;
    }

    /// Counties in a state, exact name match, in presentation order
    pub fn counties_in_state(&self, state: &str) -> Vec<CountyIdentifier> {
        match self.state_index.get(state) {
            Some(members) => self
                .unique_counties
                .iter()
                .filter(|county| members.contains(county))
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }

    /// Counties whose "county state" name contains the given word token
    ///
    /// Token match is exact against the lowercase word index, unlike the
    /// substring semantics of free-text search.
    pub fn counties_matching_token(&self, token: &str) -> Vec<CountyIdentifier> {
        match self.search_index.get(&token.to_lowercase()) {
            Some(members) => self
                .unique_counties
                .iter()
                .filter(|county| members.contains(county))
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }
}
