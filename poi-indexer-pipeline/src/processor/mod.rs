//! Processor module for the POI importer pipeline.
//!
//! Normalizes POI records into search documents via the external document
//! service.

mod http_normalizer;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::PipelineError;
use poi_indexer_shared::PoiRecord;

pub use http_normalizer::HttpNormalizer;

/// Abstract normalizer turning a POI record into a search document.
///
/// A returned error marks the record as not normalizable; the orchestrator
/// logs it and skips the record without aborting the run.
#[async_trait]
pub trait Normalizer: Send + Sync {
    /// Normalize one record into an opaque JSON document.
    async fn normalize(&self, record: &PoiRecord) -> Result<Value, PipelineError>;
}
