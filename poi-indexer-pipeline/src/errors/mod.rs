//! Error types for the POI importer pipeline.

use poi_indexer_repository::SearchIndexError;
use thiserror::Error;

/// Errors that can occur in the importer pipeline.
///
/// `SourceError` is fatal for a run; `TransformError` and loader-side errors
/// are per-record and explicitly ignored by the orchestrator, which logs them
/// and continues with the next record.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Error reading from the spatial store.
    #[error("Source error: {0}")]
    SourceError(String),

    /// Error normalizing a record via the document service.
    #[error("Transform error: {0}")]
    TransformError(String),

    /// Error from the loader component.
    #[error("Loader error: {0}")]
    LoaderError(String),

    /// Error from the search index.
    #[error("Search index error: {0}")]
    SearchIndexError(#[from] SearchIndexError),
}

impl PipelineError {
    /// Create a source error.
    pub fn source(msg: impl Into<String>) -> Self {
        Self::SourceError(msg.into())
    }

    /// Create a transform error.
    pub fn transform(msg: impl Into<String>) -> Self {
        Self::TransformError(msg.into())
    }

    /// Create a loader error.
    pub fn loader(msg: impl Into<String>) -> Self {
        Self::LoaderError(msg.into())
    }
}

impl From<sqlx::Error> for PipelineError {
    fn from(err: sqlx::Error) -> Self {
        Self::SourceError(err.to_string())
    }
}
