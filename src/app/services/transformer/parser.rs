//! Core CSV transform implementation
//!
//! Decodes the dataset bytes as UTF-8, walks the data rows with a
//! quoting-disabled CSV reader and maps each retained row through the
//! configured column layout.

use csv::StringRecord;
use tracing::debug;

use super::stats::{ParseResult, ParseStats};
use crate::app::models::HealthRecord;
use crate::config::ColumnLayout;
use crate::constants::MIN_DATASET_LINES;
use crate::{Error, Result};

/// Transform raw dataset bytes into health records
///
/// Convenience wrapper over [`transform_with_stats`] for callers that do not
/// need row accounting.
pub fn transform(bytes: &[u8], layout: &ColumnLayout) -> Result<Vec<HealthRecord>> {
    transform_with_stats(bytes, layout).map(|result| result.records)
}

/// Transform raw dataset bytes into health records with parse statistics
///
/// # Errors
/// * `Error::InvalidEncoding` if the bytes are not valid UTF-8
/// * `Error::InvalidFormat` if the text has fewer than two lines (a header
///   and at least one data row are required)
///
/// Rows whose field count differs from the header's, or that do not reach the
/// highest column index of the layout, are dropped silently and counted in
/// [`ParseStats::rows_dropped`]. A missing or unparsable raw value maps to
/// `0.0` rather than dropping the row.
pub fn transform_with_stats(bytes: &[u8], layout: &ColumnLayout) -> Result<ParseResult> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| Error::invalid_encoding(format!("dataset is not valid UTF-8: {}", e)))?;

    if text.lines().count() < MIN_DATASET_LINES {
        return Err(Error::invalid_format(
            "dataset needs a header line and at least one data row",
        ));
    }

    // The source format is positional and carries no quoting or escaping, so
    // quote characters are treated as ordinary field content.
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .from_reader(text.as_bytes());

    let expected_fields = reader
        .headers()
        .map_err(|e| Error::csv_parsing("failed to read dataset header", Some(e)))?
        .len();

    let mut stats = ParseStats::new();
    let mut records = Vec::new();
    let mut row = StringRecord::new();

    while reader
        .read_record(&mut row)
        .map_err(|e| Error::csv_parsing("failed to read dataset row", Some(e)))?
    {
        stats.rows_seen += 1;

        if row.len() != expected_fields || row.len() < layout.min_columns() {
            stats.rows_dropped += 1;
            continue;
        }

        let id = records.len() as u64;
        records.push(map_row(&row, layout, id));
        stats.records_parsed += 1;
    }

    debug!(
        "Transformed dataset: {} rows seen, {} records parsed, {} dropped",
        stats.rows_seen, stats.records_parsed, stats.rows_dropped
    );

    Ok(ParseResult { records, stats })
}

/// Map one retained row to a record through the column layout
fn map_row(row: &StringRecord, layout: &ColumnLayout, id: u64) -> HealthRecord {
    let field = |index: usize| row.get(index).unwrap_or("").trim().to_string();

    let county_code = field(layout.county_code);
    let raw_value = row
        .get(layout.raw_value)
        .map(str::trim)
        .and_then(|value| value.parse::<f64>().ok())
        .unwrap_or(0.0);

    HealthRecord {
        id,
        state: field(layout.state),
        county: field(layout.county),
        state_code: field(layout.state_code),
        fips_code: county_code.clone(),
        county_code,
        year_span: field(layout.year_span),
        measure_name: field(layout.measure_name),
        raw_value,
        release_year: field(layout.release_year),
    }
}
