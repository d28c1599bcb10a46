//! PostgreSQL/PostGIS record source implementation.
//!
//! Streams POI rows from the `osm_poi_point` table, reprojecting geometries
//! to geographic coordinates (EPSG:4326) in the query itself.

use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::errors::PipelineError;
use crate::extractor::RecordSource;
use poi_indexer_shared::PoiRecord;

/// The fixed extraction query.
///
/// The identifier is cast to text so it stays opaque to the pipeline, and
/// rows with empty names are filtered out at the source.
const POI_QUERY: &str = "SELECT id::text AS id, \
    ST_X(ST_Transform(geometry, 4326)) AS lon, \
    ST_Y(ST_Transform(geometry, 4326)) AS lat, \
    name \
    FROM osm_poi_point \
    WHERE name <> ''";

/// Raw row shape as returned by the extraction query.
#[derive(Debug, sqlx::FromRow)]
struct PoiRow {
    id: String,
    lon: f64,
    lat: f64,
    name: String,
}

impl From<PoiRow> for PoiRecord {
    fn from(row: PoiRow) -> Self {
        PoiRecord {
            id: row.id,
            lon: row.lon,
            lat: row.lat,
            name: row.name,
        }
    }
}

/// Render the extraction query, appending an optional row limit.
fn build_query(limit: Option<u32>) -> String {
    match limit {
        Some(n) => format!("{} LIMIT {}", POI_QUERY, n),
        None => POI_QUERY.to_string(),
    }
}

/// PostgreSQL-backed record source.
///
/// Holds one connection for the duration of the run. Connection failure is
/// fatal and reported from `connect` before any record is processed.
pub struct PostgresSource {
    pool: PgPool,
    query: String,
}

impl PostgresSource {
    /// Connect to the spatial store.
    ///
    /// # Arguments
    ///
    /// * `conn_str` - PostgreSQL connection string
    /// * `limit` - Optional cap on the number of rows extracted
    ///
    /// # Returns
    ///
    /// * `Ok(PostgresSource)` - Connected source ready to stream records
    /// * `Err(PipelineError::SourceError)` - If the connection cannot be established
    pub async fn connect(conn_str: &str, limit: Option<u32>) -> Result<Self, PipelineError> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect(conn_str)
            .await
            .map_err(|e| {
                PipelineError::source(format!("Failed to connect to spatial store: {}", e))
            })?;

        info!(limit = ?limit, "Connected to spatial store");

        Ok(Self {
            pool,
            query: build_query(limit),
        })
    }
}

#[async_trait]
impl RecordSource for PostgresSource {
    fn records(&self) -> BoxStream<'_, Result<PoiRecord, PipelineError>> {
        sqlx::query_as::<_, PoiRow>(&self.query)
            .fetch(&self.pool)
            .map(|row| row.map(PoiRecord::from).map_err(PipelineError::from))
            .boxed()
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
