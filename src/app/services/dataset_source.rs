//! Dataset source abstraction
//!
//! The registry loads its dataset through the [`DatasetSource`] trait so the
//! transport can be swapped: plain HTTPS GET in production, a local file copy
//! for offline use, and in-memory sources in tests. Fetching is the only
//! suspending operation in the pipeline.

use futures::future::BoxFuture;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::Config;
use crate::constants::HTTP_USER_AGENT;
use crate::{Error, Result};

/// A source of raw dataset bytes
pub trait DatasetSource: Send + Sync + std::fmt::Debug {
    /// Fetch the complete dataset
    fn fetch(&self) -> BoxFuture<'_, Result<Vec<u8>>>;

    /// Human-readable description of the source, for logging and metadata
    fn describe(&self) -> String;
}

/// HTTPS source fetching the dataset with a plain GET
///
/// No auth, no pagination, no conditional caching headers; redundant fetches
/// are avoided by the dataset cache, not the transport.
#[derive(Debug)]
pub struct HttpDatasetSource {
    url: String,
    client: reqwest::Client,
}

impl HttpDatasetSource {
    /// Create a source for the configured dataset URL
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(HTTP_USER_AGENT);
        if config.fetch_timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.fetch_timeout_secs));
        }

        let client = builder.build().map_err(|e| {
            Error::fetch(
                config.dataset_url.clone(),
                "failed to build HTTP client",
                Some(e),
            )
        })?;

        Ok(Self {
            url: config.dataset_url.clone(),
            client,
        })
    }
}

impl DatasetSource for HttpDatasetSource {
    fn fetch(&self) -> BoxFuture<'_, Result<Vec<u8>>> {
        Box::pin(async move {
            info!("Fetching dataset from {}", self.url);

            let response = self
                .client
                .get(&self.url)
                .send()
                .await
                .map_err(|e| Error::fetch(self.url.clone(), "request failed", Some(e)))?;

            let status = response.status();
            if !status.is_success() {
                return Err(Error::fetch(
                    self.url.clone(),
                    format!("unexpected HTTP status {}", status),
                    None,
                ));
            }

            let bytes = response
                .bytes()
                .await
                .map_err(|e| Error::fetch(self.url.clone(), "failed to read body", Some(e)))?;

            debug!("Fetched {} bytes from {}", bytes.len(), self.url);
            Ok(bytes.to_vec())
        })
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Local-file source for working from a downloaded copy of the dataset
#[derive(Debug)]
pub struct FileDatasetSource {
    path: PathBuf,
}

impl FileDatasetSource {
    /// Create a source reading the dataset from the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DatasetSource for FileDatasetSource {
    fn fetch(&self) -> BoxFuture<'_, Result<Vec<u8>>> {
        Box::pin(async move {
            info!("Reading dataset from {}", self.path.display());

            tokio::fs::read(&self.path).await.map_err(|e| {
                Error::io(
                    format!("failed to read dataset file {}", self.path.display()),
                    e,
                )
            })
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_file_source_reads_bytes() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "header\nrow").unwrap();

        let source = FileDatasetSource::new(file.path());
        let bytes = source.fetch().await.unwrap();

        assert_eq!(bytes, b"header\nrow");
        assert_eq!(source.describe(), file.path().display().to_string());
    }

    #[tokio::test]
    async fn test_file_source_missing_path_is_io_error() {
        let source = FileDatasetSource::new("/nonexistent/dataset.csv");

        match source.fetch().await {
            Err(Error::Io { .. }) => {}
            other => panic!("expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn test_http_source_describe_is_url() {
        let config = Config::default().with_dataset_url("https://example.com/data.csv");
        let source = HttpDatasetSource::new(&config).unwrap();
        assert_eq!(source.describe(), "https://example.com/data.csv");
    }
}
