use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ModelError, Result};
use crate::index::Index;

/// Docstore settings reported by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexSettings {
    pub docstore_blocksize: u64,
    pub docstore_compression: String,
}

/// Snapshot of an index as reported by `/{index}/_summary`.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexSummary {
    pub index_settings: IndexSettings,
    /// Segment descriptors, kept opaque.
    pub segments: Vec<Value>,
    /// Counter of committed write operations.
    pub opstamp: u64,
    pub index: Index,
}

impl IndexSummary {
    /// Decode the object found under the `summaries` key of a summary response.
    pub fn from_json(index_name: &str, data: &Value) -> Result<Self> {
        let schema = data
            .get("schema")
            .ok_or_else(|| ModelError::Malformed("summary has no schema".to_string()))?;
        let index = Index::from_json(index_name, schema)?;

        let index_settings = data
            .get("index_settings")
            .cloned()
            .ok_or_else(|| ModelError::Malformed("summary has no index_settings".to_string()))?;
        let index_settings: IndexSettings = serde_json::from_value(index_settings)?;

        let segments = match data.get("segments") {
            Some(Value::Array(segments)) => segments.clone(),
            Some(Value::Null) | None => Vec::new(),
            Some(other) => {
                return Err(ModelError::Malformed(format!(
                    "segments must be an array, got {}",
                    other
                )))
            }
        };

        let opstamp = data
            .get("opstamp")
            .and_then(Value::as_u64)
            .ok_or_else(|| ModelError::Malformed("summary has no opstamp".to_string()))?;

        Ok(Self {
            index_settings,
            segments,
            opstamp,
            index,
        })
    }
}
