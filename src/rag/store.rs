//! VectorIndex trait — abstract interface over the hosted vector index.
//!
//! The index owns persistence and nearest-neighbour search; this crate only
//! writes records during ingestion and reads ranked matches per query.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::errors::ApiError;

/// Metadata key holding the source sentence of a record.
pub const TEXT_METADATA_KEY: &str = "text";

/// A record written to the index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorRecord {
    /// Unique identifier; writing an existing id overwrites it.
    pub id: String,
    pub values: Vec<f32>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

impl VectorRecord {
    /// Record whose metadata carries the original text.
    pub fn with_text(id: impl Into<String>, values: Vec<f32>, text: &str) -> Self {
        let mut metadata = Map::new();
        metadata.insert(TEXT_METADATA_KEY.to_string(), Value::String(text.to_string()));
        Self {
            id: id.into(),
            values,
            metadata,
        }
    }
}

/// A ranked search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorMatch {
    pub id: String,
    /// Similarity score (higher = better).
    #[serde(default)]
    pub score: f32,
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
}

impl VectorMatch {
    /// Stored text, if the match carries a non-empty one.
    pub fn text(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.get(TEXT_METADATA_KEY))
            .and_then(|v| v.as_str())
            .filter(|text| !text.is_empty())
    }
}

#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Human-readable index name for logs.
    fn name(&self) -> &str;

    /// Write records; returns how many the index acknowledged.
    async fn upsert(&self, records: Vec<VectorRecord>) -> Result<usize, ApiError>;

    /// Top-k nearest records to `vector`, best first.
    async fn query(
        &self,
        vector: &[f32],
        top_k: usize,
        include_metadata: bool,
    ) -> Result<Vec<VectorMatch>, ApiError>;
}
