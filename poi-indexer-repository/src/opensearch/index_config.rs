//! OpenSearch index configuration and mappings.
//!
//! This module defines the index settings and mappings for the POI search index.

use serde_json::{json, Value};

/// The name of the search index.
pub const INDEX_NAME: &str = "pelias";

/// Get the index settings and mappings for the POI search index.
///
/// The configuration covers only the fields the importer relies on; the
/// normalization service's documents are otherwise mapped dynamically:
///
/// - **Keyword fields**: `source` and `layer` for filtering
/// - **geo_point**: `center_point` for spatial queries
/// - **text**: the default name for full-text search
pub fn get_index_settings() -> Value {
    json!({
        "settings": {
            "number_of_shards": 1,
            "number_of_replicas": 1
        },
        "mappings": {
            "properties": {
                "source": {
                    "type": "keyword"
                },
                "layer": {
                    "type": "keyword"
                },
                "name": {
                    "properties": {
                        "default": {
                            "type": "text"
                        }
                    }
                },
                "center_point": {
                    "type": "geo_point"
                }
            }
        }
    })
}
