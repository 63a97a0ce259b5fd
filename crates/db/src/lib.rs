//! Row-store backends for Pulse dashboards.
//!
//! This crate provides:
//! - `RestRowSource` for hosted REST tables
//! - `JsonFileRowSource` for JSON fixtures on disk
//! - `row_source` to pick one from configuration

pub mod fixture;
pub mod rest;
mod row;

use std::sync::Arc;
use std::time::Duration;

use pulse_core::dashboard::RowSource;
use pulse_shared::config::{RowStoreConfig, RowStoreKind};
use thiserror::Error;

pub use fixture::JsonFileRowSource;
pub use rest::RestRowSource;

/// Errors raised while building a row source.
#[derive(Debug, Error)]
pub enum RowSourceError {
    /// REST backend selected without a base URL.
    #[error("row_store.base_url is required for the rest backend")]
    MissingBaseUrl,

    /// REST backend selected without an API key.
    #[error("row_store.api_key is required for the rest backend")]
    MissingApiKey,

    /// HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Builds the row source named by the configuration.
///
/// # Errors
///
/// Returns an error if the REST backend is selected but not fully
/// configured.
pub fn row_source(config: &RowStoreConfig) -> Result<Arc<dyn RowSource>, RowSourceError> {
    match config.kind {
        RowStoreKind::Rest => {
            let base_url = config
                .base_url
                .as_deref()
                .ok_or(RowSourceError::MissingBaseUrl)?;
            let api_key = config
                .api_key
                .as_deref()
                .ok_or(RowSourceError::MissingApiKey)?;
            let source =
                RestRowSource::new(base_url, api_key, Duration::from_secs(config.timeout_secs))?;
            Ok(Arc::new(source))
        }
        RowStoreKind::Fixture => Ok(Arc::new(JsonFileRowSource::new(&config.fixture_dir))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_requires_base_url() {
        let config = RowStoreConfig {
            kind: RowStoreKind::Rest,
            ..RowStoreConfig::default()
        };
        assert!(matches!(
            row_source(&config),
            Err(RowSourceError::MissingBaseUrl)
        ));
    }

    #[test]
    fn test_rest_requires_api_key() {
        let config = RowStoreConfig {
            kind: RowStoreKind::Rest,
            base_url: Some("https://rows.example.com".to_string()),
            ..RowStoreConfig::default()
        };
        assert!(matches!(
            row_source(&config),
            Err(RowSourceError::MissingApiKey)
        ));
    }

    #[test]
    fn test_fixture_is_default() {
        let source = row_source(&RowStoreConfig::default()).unwrap();
        assert_eq!(source.name(), "fixture");
    }
}
