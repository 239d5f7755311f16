//! Index schema: an ordered list of named, typed fields.
//!
//! The field array produced by [`Index::to_json`] is the exact body of a
//! create-index request, and [`Index::from_json`] rebuilds an index from the
//! `schema` array the server embeds in its summaries.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::error::{ModelError, Result};
use crate::field_options::{FacetOptions, FieldOptions, NumericOptions, TextOptions};

/// Field types modelled by this client.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    U64,
    I64,
    F64,
    Bool,
    Facet,
}

/// Type names the server knows but this client has no representation for.
const UNIMPLEMENTED_TYPES: &[&str] = &["date", "json", "json_object", "bytes", "ip", "ip_addr"];

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::U64 => "u64",
            FieldType::I64 => "i64",
            FieldType::F64 => "f64",
            FieldType::Bool => "bool",
            FieldType::Facet => "facet",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            FieldType::U64 | FieldType::I64 | FieldType::F64 | FieldType::Bool
        )
    }

    /// Resolve a wire type name.
    pub fn from_wire(name: &str) -> Result<Self> {
        match name {
            "text" => Ok(FieldType::Text),
            "u64" => Ok(FieldType::U64),
            "i64" => Ok(FieldType::I64),
            "f64" => Ok(FieldType::F64),
            "bool" => Ok(FieldType::Bool),
            "facet" => Ok(FieldType::Facet),
            other if UNIMPLEMENTED_TYPES.contains(&other) => {
                Err(ModelError::NotImplemented(other.to_string()))
            }
            other => Err(ModelError::UnknownFieldType(other.to_string())),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One named field of an index.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct IndexField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub options: FieldOptions,
}

/// A named schema. Built by [`crate::IndexBuilder`] or decoded from a summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    name: String,
    fields: Vec<IndexField>,
}

impl Index {
    pub(crate) fn new(name: impl Into<String>, fields: Vec<IndexField>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[IndexField] {
        &self.fields
    }

    /// First field with the given name.
    pub fn field(&self, name: &str) -> Option<&IndexField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Field array in creation order, as sent to `/{index}/_create`.
    pub fn to_json(&self) -> Value {
        Value::Array(
            self.fields
                .iter()
                .map(|field| {
                    serde_json::json!({
                        "name": field.name,
                        "type": field.field_type,
                        "options": field.options,
                    })
                })
                .collect(),
        )
    }

    /// Rebuild an index from a field array.
    ///
    /// Text fields drop the `fast` flag the server reports for them; date,
    /// json, bytes and ip fields are refused as not implemented.
    pub fn from_json(name: impl Into<String>, data: &Value) -> Result<Self> {
        let raw_fields = data
            .as_array()
            .ok_or_else(|| ModelError::Malformed("schema must be an array of fields".to_string()))?;

        let mut fields = Vec::with_capacity(raw_fields.len());
        for raw_field in raw_fields {
            fields.push(decode_field(raw_field)?);
        }

        Ok(Self::new(name, fields))
    }
}

fn decode_field(raw_field: &Value) -> Result<IndexField> {
    let name = raw_field
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| ModelError::Malformed(format!("field without a name: {}", raw_field)))?;
    let type_name = raw_field
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| ModelError::Malformed(format!("field '{}' has no type", name)))?;
    let mut options: Map<String, Value> = match raw_field.get("options") {
        Some(Value::Object(options)) => options.clone(),
        _ => {
            return Err(ModelError::Malformed(format!(
                "field '{}' has no options object",
                name
            )))
        }
    };

    let field_type = FieldType::from_wire(type_name)?;
    let options = match field_type {
        FieldType::Text => {
            // Reported for text fields even though they have no fast mode.
            options.remove("fast");
            FieldOptions::Text(serde_json::from_value::<TextOptions>(Value::Object(options))?)
        }
        FieldType::U64 | FieldType::I64 | FieldType::F64 | FieldType::Bool => FieldOptions::Numeric(
            serde_json::from_value::<NumericOptions>(Value::Object(options))?,
        ),
        FieldType::Facet => {
            FieldOptions::Facet(serde_json::from_value::<FacetOptions>(Value::Object(options))?)
        }
    };

    Ok(IndexField {
        name: name.to_string(),
        field_type,
        options,
    })
}
