//! Search index provider trait definition.
//!
//! This module defines the abstract interface for search index operations,
//! allowing for different backend implementations (OpenSearch, Elasticsearch, etc.).

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::SearchIndexError;

/// Abstracts the underlying search index implementation.
///
/// This trait defines the interface the importer needs from a search backend.
/// Implementations are injected into the pipeline loader to enable dependency
/// injection and easy testing with mock implementations.
///
/// All methods return `Result<T, SearchIndexError>` for consistent error
/// handling across different backend implementations.
#[async_trait]
pub trait SearchIndexProvider: Send + Sync {
    /// Upsert a single document under the given ID.
    ///
    /// If a document with the same ID already exists, it is replaced;
    /// otherwise it is created.
    ///
    /// # Arguments
    ///
    /// * `id` - The document identifier (the source row's identifier)
    /// * `document` - The normalized JSON document to index, treated as opaque
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the index acknowledged the write
    /// * `Err(SearchIndexError)` - If the write fails
    async fn upsert_document(&self, id: &str, document: &Value) -> Result<(), SearchIndexError>;

    /// Create the search index with its settings and mappings if it does not exist.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the index exists or was created
    /// * `Err(SearchIndexError)` - If creation fails
    async fn ensure_index_exists(&self) -> Result<(), SearchIndexError>;

    /// Check whether the search engine is reachable and healthy.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the cluster responded with a healthy status
    /// * `Ok(false)` - If the cluster responded but is unhealthy
    /// * `Err(SearchIndexError)` - If the cluster could not be reached
    async fn health_check(&self) -> Result<bool, SearchIndexError>;
}
