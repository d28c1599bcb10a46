//! Orchestrator module for the POI importer pipeline.
//!
//! Coordinates the extractor, processor, and loader components.

use futures::StreamExt;
use tracing::{error, info, instrument, warn};

use crate::errors::PipelineError;
use crate::extractor::RecordSource;
use crate::loader::SearchLoader;
use crate::processor::Normalizer;

/// Counters reported at the end of a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Records normalized and acknowledged by the search index.
    pub processed: u64,
    /// Records dropped after a normalization or indexing failure.
    pub skipped: u64,
}

/// Orchestrator that drives the pipeline.
///
/// Pulls records from the source one at a time, normalizes each through the
/// processor, and hands the result to the loader. Per-record failures at the
/// normalize or upsert stage are logged and skipped; only source-level
/// failures abort the run. Records are processed strictly sequentially, with
/// no overlap between stages.
pub struct Orchestrator {
    source: Box<dyn RecordSource>,
    normalizer: Box<dyn Normalizer>,
    loader: SearchLoader,
}

impl Orchestrator {
    /// Create a new orchestrator with the given components.
    pub fn new(
        source: Box<dyn RecordSource>,
        normalizer: Box<dyn Normalizer>,
        loader: SearchLoader,
    ) -> Self {
        Self {
            source,
            normalizer,
            loader,
        }
    }

    /// Run the pipeline to completion.
    ///
    /// The source connection is released on every exit path, including the
    /// fatal one.
    #[instrument(skip(self))]
    pub async fn run(&mut self) -> Result<RunSummary, PipelineError> {
        info!("Starting POI import pipeline");

        // Ensure the search index exists before touching any record
        self.loader.ensure_index().await?;

        let mut summary = RunSummary::default();
        let result = self.drain_source(&mut summary).await;

        self.source.close().await;

        result?;
        info!(
            processed = summary.processed,
            skipped = summary.skipped,
            "POI import complete"
        );
        Ok(summary)
    }

    /// Consume the record stream, isolating per-record failures.
    async fn drain_source(&self, summary: &mut RunSummary) -> Result<(), PipelineError> {
        let mut records = self.source.records();

        while let Some(item) = records.next().await {
            // A stream-level error (connection lost, malformed row) is fatal
            let record = item?;

            info!(
                id = %record.id,
                name = %record.name,
                lon = record.lon,
                lat = record.lat,
                "Processing POI record"
            );

            let document = match self.normalizer.normalize(&record).await {
                Ok(document) => document,
                Err(e) => {
                    warn!(id = %record.id, error = %e, "Skipping record after failed normalization");
                    summary.skipped += 1;
                    continue;
                }
            };

            match self.loader.upsert(&record.id, &document).await {
                Ok(()) => summary.processed += 1,
                Err(e) => {
                    error!(id = %record.id, error = %e, "Failed to index record");
                    summary.skipped += 1;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use futures::stream::{self, BoxStream};
    use poi_indexer_repository::{SearchIndexError, SearchIndexProvider};
    use poi_indexer_shared::PoiRecord;
    use serde_json::{json, Value};
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Source backed by a fixed list of items; single pass like the real one.
    struct MockSource {
        items: Mutex<Option<Vec<Result<PoiRecord, PipelineError>>>>,
        closed: Arc<AtomicBool>,
    }

    impl MockSource {
        fn new(items: Vec<Result<PoiRecord, PipelineError>>) -> (Self, Arc<AtomicBool>) {
            let closed = Arc::new(AtomicBool::new(false));
            (
                Self {
                    items: Mutex::new(Some(items)),
                    closed: closed.clone(),
                },
                closed,
            )
        }
    }

    #[async_trait]
    impl RecordSource for MockSource {
        fn records(&self) -> BoxStream<'_, Result<PoiRecord, PipelineError>> {
            let items = self
                .items
                .lock()
                .unwrap()
                .take()
                .expect("records() consumed twice");
            stream::iter(items).boxed()
        }

        async fn close(&self) {
            self.closed.store(true, Ordering::SeqCst);
        }
    }

    /// Normalizer returning canned responses in order.
    struct MockNormalizer {
        responses: Mutex<VecDeque<Result<Value, PipelineError>>>,
        calls: Arc<AtomicUsize>,
    }

    impl MockNormalizer {
        fn new(responses: Vec<Result<Value, PipelineError>>) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    responses: Mutex::new(responses.into()),
                    calls: calls.clone(),
                },
                calls,
            )
        }
    }

    #[async_trait]
    impl Normalizer for MockNormalizer {
        async fn normalize(&self, _record: &PoiRecord) -> Result<Value, PipelineError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(PipelineError::transform("no canned response")))
        }
    }

    /// Search client recording upserts, optionally failing them.
    struct MockSearchClient {
        upserts: Mutex<Vec<(String, Value)>>,
        fail_upserts: bool,
    }

    impl MockSearchClient {
        fn new(fail_upserts: bool) -> Self {
            Self {
                upserts: Mutex::new(Vec::new()),
                fail_upserts,
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
            Ok(true)
        }
    }

    fn record(id: &str, lon: f64, lat: f64, name: &str) -> PoiRecord {
        PoiRecord::new(id, lon, lat, name)
    }

    fn orchestrator(
        items: Vec<Result<PoiRecord, PipelineError>>,
        responses: Vec<Result<Value, PipelineError>>,
        fail_upserts: bool,
    ) -> (
        Orchestrator,
        Arc<MockSearchClient>,
        Arc<AtomicUsize>,
        Arc<AtomicBool>,
    ) {
        let (source, closed) = MockSource::new(items);
        let (normalizer, calls) = MockNormalizer::new(responses);
        let client = Arc::new(MockSearchClient::new(fail_upserts));
        let loader = SearchLoader::new(client.clone());
        (
            Orchestrator::new(Box::new(source), Box::new(normalizer), loader),
            client,
            calls,
            closed,
        )
    }

    #[tokio::test]
    async fn test_single_record_end_to_end() {
        let document = json!({"name": "Cafe A", "category": "cafe"});
        let (mut orchestrator, client, _calls, closed) = orchestrator(
            vec![Ok(record("n1", 2.35, 48.85, "Cafe A"))],
            vec![Ok(document.clone())],
            false,
        );

        let summary = orchestrator.run().await.unwrap();
        assert_eq!(summary, RunSummary { processed: 1, skipped: 0 });

        let upserts = client.upserts.lock().unwrap();
        assert_eq!(upserts.len(), 1);
        assert_eq!(upserts[0].0, "n1");
        assert_eq!(upserts[0].1, document);
        assert!(closed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_failed_normalization_does_not_halt_batch() {
        let document = json!({"name": "Cafe B"});
        let (mut orchestrator, client, calls, _closed) = orchestrator(
            vec![
                Ok(record("n1", 2.35, 48.85, "Cafe A")),
                Ok(record("n2", 2.36, 48.86, "Cafe B")),
            ],
            vec![
                Err(PipelineError::transform("service returned status 500")),
                Ok(document.clone()),
            ],
            false,
        );

        let summary = orchestrator.run().await.unwrap();
        assert_eq!(summary, RunSummary { processed: 1, skipped: 1 });
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        // No upsert for the failed record, exactly one for the second
        let upserts = client.upserts.lock().unwrap();
        assert_eq!(upserts.len(), 1);
        assert_eq!(upserts[0].0, "n2");
        assert_eq!(upserts[0].1, document);
    }

    #[tokio::test]
    async fn test_failed_upsert_does_not_halt_batch() {
        let (mut orchestrator, _client, calls, closed) = orchestrator(
            vec![
                Ok(record("n1", 2.35, 48.85, "Cafe A")),
                Ok(record("n2", 2.36, 48.86, "Cafe B")),
            ],
            vec![Ok(json!({"name": "Cafe A"})), Ok(json!({"name": "Cafe B"}))],
            true,
        );

        // The run completes despite every upsert failing
        let summary = orchestrator.run().await.unwrap();
        assert_eq!(summary, RunSummary { processed: 0, skipped: 2 });
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(closed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_source_failure_is_fatal() {
        let (mut orchestrator, client, calls, closed) = orchestrator(
            vec![Err(PipelineError::source("malformed row"))],
            vec![],
            false,
        );

        let result = orchestrator.run().await;
        assert!(matches!(result, Err(PipelineError::SourceError(_))));

        // Nothing was transformed or indexed, and the source was still released
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(client.upserts.lock().unwrap().is_empty());
        assert!(closed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_empty_source_completes() {
        let (mut orchestrator, client, calls, _closed) = orchestrator(vec![], vec![], false);

        let summary = orchestrator.run().await.unwrap();
        assert_eq!(summary, RunSummary::default());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(client.upserts.lock().unwrap().is_empty());
    }
}
