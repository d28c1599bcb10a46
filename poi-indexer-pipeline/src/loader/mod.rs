//! Loader module for the POI importer pipeline.
//!
//! Upserts normalized documents into the search index, one record at a time.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::errors::PipelineError;
use poi_indexer_repository::SearchIndexProvider;

/// Loader that writes normalized documents into the search engine.
///
/// Each document is indexed individually under the source row's identifier
/// with create-or-replace semantics. Failures surface as `Err` values for the
/// orchestrator to log and ignore; the loader never aborts a run on its own.
pub struct SearchLoader {
    client: Arc<dyn SearchIndexProvider>,
}

impl SearchLoader {
    /// Create a new search loader with the given client.
    pub fn new(client: Arc<dyn SearchIndexProvider>) -> Self {
        Self { client }
    }

    /// Upsert one normalized document under the given identifier.
    pub async fn upsert(&self, id: &str, document: &Value) -> Result<(), PipelineError> {
        self.client.upsert_document(id, document).await?;
        debug!(doc_id = %id, "Search index acknowledged upsert");
        Ok(())
    }

    /// Ensure the search index exists.
    pub async fn ensure_index(&self) -> Result<(), PipelineError> {
        self.client
            .ensure_index_exists()
            .await
            .map_err(|e| PipelineError::LoaderError(e.to_string()))
    }

    /// Check if the search engine is healthy.
    pub async fn health_check(&self) -> Result<bool, PipelineError> {
        self.client
            .health_check()
            .await
            .map_err(|e| PipelineError::LoaderError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use poi_indexer_repository::SearchIndexError;
    use serde_json::json;
    use std::sync::Mutex;

    /// Mock search client for testing.
    struct MockSearchClient {
        upserts: Mutex<Vec<(String, Value)>>,
        fail_upserts: bool,
        healthy: bool,
    }

    impl MockSearchClient {
        fn new() -> Self {
            Self {
                upserts: Mutex::new(Vec::new()),
                fail_upserts: false,
                healthy: true,
            }
        }

        fn failing() -> Self {
            Self {
                fail_upserts: true,
                ..Self::new()
            }
        }

        fn unhealthy() -> Self {
            Self {
                healthy: false,
                ..Self::new()
            }
        }
    }

    #[async_trait]
    impl SearchIndexProvider for MockSearchClient {
        async fn upsert_document(&self, id: &str, document: &Value) -> Result<(), SearchIndexError> {
            if self.fail_upserts {
                return Err(SearchIndexError::index("transport failure"));
            }
            self.upserts
                .lock()
                .unwrap()
                .push((id.to_string(), document.clone()));
            Ok(())
        }

        async fn ensure_index_exists(&self) -> Result<(), SearchIndexError> {
            Ok(())
        }

        async fn health_check(&self) -> Result<bool, SearchIndexError> {
            Ok(self.healthy)
        }
    }

    #[tokio::test]
    async fn test_upsert_forwards_id_and_document() {
        let client = Arc::new(MockSearchClient::new());
        let loader = SearchLoader::new(client.clone());

        let document = json!({"name": "Cafe A", "category": "cafe"});
        loader.upsert("n1", &document).await.unwrap();

        let upserts = client.upserts.lock().unwrap();
        assert_eq!(upserts.len(), 1);
        assert_eq!(upserts[0].0, "n1");
        assert_eq!(upserts[0].1, document);
    }

    #[tokio::test]
    async fn test_health_check_reports_cluster_state() {
        let loader = SearchLoader::new(Arc::new(MockSearchClient::new()));
        assert!(loader.health_check().await.unwrap());

        let loader = SearchLoader::new(Arc::new(MockSearchClient::unhealthy()));
        assert!(!loader.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_upsert_failure_surfaces_as_error() {
        let client = Arc::new(MockSearchClient::failing());
        let loader = SearchLoader::new(client);

        let result = loader.upsert("n1", &json!({})).await;
        assert!(matches!(result, Err(PipelineError::SearchIndexError(_))));
    }
}
