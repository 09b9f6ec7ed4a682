//! Echolot Catalog Adapter
//!
//! Resolves media-catalog titles into [`SourceRecord`]s and downloads the
//! referenced binaries.
//!
//! # Architecture
//!
//! This crate defines the [`AssetCatalog`] trait and its implementations.
//! Resolution is all-or-nothing: an unresolvable title or an unexpected
//! response shape fails the whole ingestion and no partial record escapes.
//!
//! # Catalogs
//!
//! - `CommonsClient`: Wikimedia Commons `imageinfo` API over HTTP
//! - `MockCatalog`: In-memory catalog for testing
//!
//! # Examples
//!
//! ```
//! use echolot_catalog::{AssetCatalog, MockCatalog};
//! use echolot_domain::SourceRecord;
//!
//! let mut catalog = MockCatalog::default();
//! catalog.add_source("File:Demo.jpg", SourceRecord::default());
//!
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! let source = runtime.block_on(catalog.fetch_source("File:Demo.jpg")).unwrap();
//! assert_eq!(source, SourceRecord::default());
//! ```

#![warn(missing_docs)]

mod api;
pub mod commons;
mod mapping;

use echolot_domain::SourceRecord;
use std::collections::BTreeMap;
use std::future::Future;
use thiserror::Error;

pub use commons::{CatalogSettings, CommonsClient};
pub use mapping::{source_from_response, COMMONS_AGENT_ID, COMMONS_AGENT_LABEL, FALLBACK_LICENSE_URL};

/// Errors that can occur during catalog operations
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The title does not name an existing file
    #[error("Title not resolved: {title}")]
    TitleNotResolved {
        /// Requested title
        title: String,
    },

    /// The response did not have the expected shape
    #[error("Malformed upstream response for {title}: {detail}")]
    MalformedUpstreamResponse {
        /// Requested title
        title: String,
        /// What was missing or unparseable
        detail: String,
    },

    /// The upstream kept refusing requests
    #[error("Upstream rate limited {subject} after {attempts} attempts")]
    UpstreamRateLimited {
        /// Title or URL being requested
        subject: String,
        /// Attempts made
        attempts: u32,
    },

    /// Network or HTTP error
    #[error("Communication error: {0}")]
    Communication(String),

    /// The asset binary could not be downloaded
    #[error("Asset unavailable at {url}: HTTP {status}")]
    AssetUnavailable {
        /// Content URL
        url: String,
        /// Response status
        status: u16,
    },

    /// The client could not be constructed
    #[error("Invalid client configuration: {0}")]
    Configuration(String),
}

/// A source of asset metadata and binaries
pub trait AssetCatalog {
    /// Resolve a title into a source record
    fn fetch_source(
        &self,
        title: &str,
    ) -> impl Future<Output = Result<SourceRecord, CatalogError>> + Send;

    /// Download the binary at a content URL
    fn download_asset(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, CatalogError>> + Send;
}

/// In-memory catalog for deterministic testing
///
/// Unknown titles fail with [`CatalogError::TitleNotResolved`] and unknown
/// URLs with [`CatalogError::AssetUnavailable`] (status 404).
#[derive(Debug, Clone, Default)]
pub struct MockCatalog {
    sources: BTreeMap<String, SourceRecord>,
    assets: BTreeMap<String, Vec<u8>>,
}

impl MockCatalog {
    /// Register a source record under a title
    pub fn add_source(&mut self, title: impl Into<String>, source: SourceRecord) {
        self.sources.insert(title.into(), source);
    }

    /// Register asset bytes under a URL
    pub fn add_asset(&mut self, url: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.assets.insert(url.into(), bytes.into());
    }
}

impl AssetCatalog for MockCatalog {
    async fn fetch_source(&self, title: &str) -> Result<SourceRecord, CatalogError> {
        self.sources
            .get(title)
            .cloned()
            .ok_or_else(|| CatalogError::TitleNotResolved {
                title: title.to_string(),
            })
    }

    async fn download_asset(&self, url: &str) -> Result<Vec<u8>, CatalogError> {
        self.assets
            .get(url)
            .cloned()
            .ok_or_else(|| CatalogError::AssetUnavailable {
                url: url.to_string(),
                status: 404,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_catalog_resolves_known_title() {
        let mut catalog = MockCatalog::default();
        let source = SourceRecord {
            title: Some("Demo".to_string()),
            ..SourceRecord::default()
        };
        catalog.add_source("File:Demo.jpg", source.clone());

        assert_eq!(catalog.fetch_source("File:Demo.jpg").await.unwrap(), source);
    }

    #[tokio::test]
    async fn test_mock_catalog_unknown_title() {
        let catalog = MockCatalog::default();
        let err = catalog.fetch_source("File:Nope.jpg").await.unwrap_err();
        assert_eq!(err.to_string(), "Title not resolved: File:Nope.jpg");
    }

    #[tokio::test]
    async fn test_mock_catalog_assets() {
        let mut catalog = MockCatalog::default();
        catalog.add_asset("https://example.org/a.jpg", b"bytes".to_vec());

        assert_eq!(
            catalog.download_asset("https://example.org/a.jpg").await.unwrap(),
            b"bytes"
        );
        assert!(matches!(
            catalog.download_asset("https://example.org/b.jpg").await,
            Err(CatalogError::AssetUnavailable { status: 404, .. })
        ));
    }
}
