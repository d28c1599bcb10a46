//! # POI Indexer Pipeline
//!
//! This crate provides the pipeline components for reading POI rows from the
//! spatial store, normalizing them through the document service, and indexing
//! them into the search engine.
//!
//! ## Architecture
//!
//! The pipeline follows the Extractor-Processor-Loader pattern:
//!
//! 1. **Extractor**: Streams POI rows from PostgreSQL
//! 2. **Processor**: Normalizes each row via the HTTP document service
//! 3. **Loader**: Upserts normalized documents into the search index
//! 4. **Orchestrator**: Coordinates the pipeline flow and isolates per-record failures

pub mod errors;
pub mod extractor;
pub mod loader;
pub mod orchestrator;
pub mod processor;

pub use errors::PipelineError;
