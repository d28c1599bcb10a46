//! OpenSearch backend implementation.

mod client;
mod index_config;

pub use client::OpenSearchClient;
pub use index_config::{get_index_settings, INDEX_NAME};
