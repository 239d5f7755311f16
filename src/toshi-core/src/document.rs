use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ModelError, Result};

/// A document type stored in one server index.
///
/// Implementors only name their index; the field mapping comes from serde.
/// The type must serialize to a flat JSON object of field name to value.
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use toshi_core::Document;
///
/// #[derive(Serialize, Deserialize)]
/// struct Lyrics {
///     lyrics: String,
///     year: i64,
/// }
///
/// impl Document for Lyrics {
///     const INDEX_NAME: &'static str = "lyrics";
/// }
/// ```
pub trait Document: Serialize + DeserializeOwned {
    const INDEX_NAME: &'static str;

    fn to_fields(&self) -> Result<Map<String, Value>> {
        match serde_json::to_value(self)? {
            Value::Object(fields) => Ok(fields),
            other => Err(ModelError::Malformed(format!(
                "document for index '{}' must serialize to an object, got {}",
                Self::INDEX_NAME,
                other
            ))),
        }
    }

    fn from_fields(fields: Map<String, Value>) -> Result<Self> {
        Ok(serde_json::from_value(Value::Object(fields))?)
    }

    /// Structural equality over the serialized field mapping.
    fn same_fields(&self, other: &Self) -> bool {
        match (self.to_fields(), other.to_fields()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

/// A returned document paired with the score the server assigned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredDocument<D> {
    #[serde(default)]
    pub score: Option<f64>,
    pub doc: D,
}
