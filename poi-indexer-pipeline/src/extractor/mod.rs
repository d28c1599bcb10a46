//! Extractor module for the POI importer pipeline.
//!
//! Provides the record source abstraction and the PostgreSQL/PostGIS implementation.

mod postgres_source;

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::errors::PipelineError;
use poi_indexer_shared::PoiRecord;

pub use postgres_source::PostgresSource;

/// Abstract source of POI records.
///
/// Implementations yield a lazy, forward-only, single-pass sequence of
/// records in the backing store's natural order. The sequence is not
/// restartable; callers consume it exactly once.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Stream the POI records.
    ///
    /// A stream-level error means the source itself failed (e.g. a malformed
    /// row) and is fatal for the run; there is no per-row recovery at this
    /// layer.
    fn records(&self) -> BoxStream<'_, Result<PoiRecord, PipelineError>>;

    /// Release the underlying connection.
    async fn close(&self);
}
