//! # POI Indexer Shared
//!
//! Shared types and data structures for the POI search importer.

use serde::{Deserialize, Serialize};

/// A point-of-interest row read from the spatial store.
///
/// Coordinates are geographic (WGS84 degrees); the `id` is the source row's
/// identifier cast to text and is used as the search index document ID. The
/// `name` field is never empty because the source query filters empty names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoiRecord {
    /// Opaque stable identifier, unique per source row.
    pub id: String,
    /// Longitude in WGS84 degrees.
    pub lon: f64,
    /// Latitude in WGS84 degrees.
    pub lat: f64,
    /// Display name of the POI, non-empty.
    pub name: String,
}

impl PoiRecord {
    /// Create a new POI record.
    pub fn new(
        id: impl Into<String>,
        lon: f64,
        lat: f64,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            lon,
            lat,
            name: name.into(),
        }
    }

    /// Export the record as key/value pairs suitable for HTTP query parameters.
    ///
    /// Field order is stable: `id`, `lon`, `lat`, `name`.
    pub fn as_query_params(&self) -> [(&'static str, String); 4] {
        [
            ("id", self.id.clone()),
            ("lon", self.lon.to_string()),
            ("lat", self.lat.to_string()),
            ("name", self.name.clone()),
        ]
    }
}
