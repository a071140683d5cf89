//! Parsing statistics and result structures for the CSV transformer

use crate::app::models::HealthRecord;

/// Transform result with records and basic statistics
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Successfully parsed health records
    pub records: Vec<HealthRecord>,

    /// Basic parsing statistics
    pub stats: ParseStats,
}

/// Simple parsing statistics
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ParseStats {
    /// Total number of data rows encountered (header excluded)
    pub rows_seen: usize,

    /// Number of records successfully parsed
    pub records_parsed: usize,

    /// Number of rows dropped for a field-count mismatch against the header
    pub rows_dropped: usize,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self {
            rows_seen: 0,
            rows_dropped: 0,
            records_parsed: 0,
        }
    }

    /// Calculate success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.rows_seen == 0 {
            0.0
        } else {
            (self.records_parsed as f64 / self.rows_seen as f64) * 100.0
        }
    }

    /// Get a summary string of the parse
    pub fn summary(&self) -> String {
        format!(
            "Parsed {} of {} rows ({} dropped, {:.1}% success)",
            self.records_parsed,
            self.rows_seen,
            self.rows_dropped,
            self.success_rate()
        )
    }
}

impl Default for ParseStats {
    fn default() -> Self {
        Self::new()
    }
}
