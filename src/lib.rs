//! County Health data pipeline
//!
//! A Rust library for loading the County Health Rankings CSV dataset into
//! typed records and answering county browsing and filtering queries.
//!
//! This library provides tools for:
//! - Transforming the raw CSV dataset into typed `HealthRecord` values
//! - Loading and indexing unique counties for fast state and token lookups
//! - Filtering the county list by exact state and conjunctive free-text search
//! - Narrowing per-county records by measure, year span and value range
//! - Caching the parsed dataset and per-county subsets across sessions

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod county_registry;
        pub mod dataset_cache;
        pub mod dataset_source;
        pub mod transformer;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{CountyIdentifier, HealthRecord};
pub use app::services::county_registry::CountyRegistry;
pub use config::Config;

/// Result type alias for the county health pipeline
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for dataset loading and transformation
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Dataset bytes are not valid UTF-8 text
    #[error("invalid dataset encoding: {message}")]
    InvalidEncoding { message: String },

    /// Dataset text is structurally unusable (e.g. missing header or data rows)
    #[error("invalid dataset format: {reason}")]
    InvalidFormat { reason: String },

    /// Fetching the dataset from its source failed
    #[error("dataset fetch from '{source_name}' failed: {message}")]
    Fetch {
        source_name: String,
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// CSV record reading error
    #[error("CSV parsing error: {message}")]
    CsvParsing {
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Configuration error
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// County registry error
    #[error("county registry error: {message}")]
    Registry { message: String },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create an invalid encoding error
    pub fn invalid_encoding(message: impl Into<String>) -> Self {
        Self::InvalidEncoding {
            message: message.into(),
        }
    }

    /// Create an invalid format error
    pub fn invalid_format(reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            reason: reason.into(),
        }
    }

    /// Create a fetch error with context
    pub fn fetch(
        source_name: impl Into<String>,
        message: impl Into<String>,
        source: Option<reqwest::Error>,
    ) -> Self {
        Self::Fetch {
            source_name: source_name.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(message: impl Into<String>, source: Option<csv::Error>) -> Self {
        Self::CsvParsing {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a county registry error
    pub fn registry(message: impl Into<String>) -> Self {
        Self::Registry {
            message: message.into(),
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(error: std::str::Utf8Error) -> Self {
        Self::InvalidEncoding {
            message: error.to_string(),
        }
    }
}
