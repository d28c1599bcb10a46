//! HTTP normalizer implementation.
//!
//! Calls the external document service once per record and passes the
//! returned JSON through untouched.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, error};

use crate::errors::PipelineError;
use crate::processor::Normalizer;
use poi_indexer_shared::PoiRecord;

/// Path of the venue normalization endpoint, relative to the service base URL.
const VENUE_PATH: &str = "/openstreetmap/venue";

/// Render the full venue endpoint URL for a service base URL.
fn venue_endpoint(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), VENUE_PATH)
}

/// Normalizer backed by the external HTTP document service.
///
/// Issues one `GET {base_url}/openstreetmap/venue` per record with the
/// record's fields as query parameters. Only a 200 response counts as
/// success; any other status, and any transport-level failure, is reported
/// as a `TransformError` so the orchestrator can skip the record and keep
/// the batch going.
///
/// No retries; the transport's default timeouts apply.
pub struct HttpNormalizer {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpNormalizer {
    /// Create a new normalizer for the given service base URL.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: venue_endpoint(base_url),
        }
    }
}

#[async_trait]
impl Normalizer for HttpNormalizer {
    async fn normalize(&self, record: &PoiRecord) -> Result<Value, PipelineError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&record.as_query_params())
            .send()
            .await
            .map_err(|e| {
                error!(id = %record.id, error = %e, "Normalization request failed");
                PipelineError::transform(format!("request failed: {}", e))
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            error!(
                id = %record.id,
                status = %status,
                body = %body,
                "Normalization service rejected record"
            );
            return Err(PipelineError::transform(format!(
                "service returned status {}: {}",
                status, body
            )));
        }

        let document: Value = response.json().await.map_err(|e| {
            error!(id = %record.id, error = %e, "Invalid JSON from normalization service");
            PipelineError::transform(format!("invalid JSON body: {}", e))
        })?;

        debug!(id = %record.id, "Record normalized");
        Ok(document)
    }
}
