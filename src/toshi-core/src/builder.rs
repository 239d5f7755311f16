use crate::field_options::{FacetOptions, FieldOptions, NumericOptions, TextOptions};
use crate::index::{FieldType, Index, IndexField};

/// Accumulates fields and produces immutable [`Index`] snapshots.
///
/// Field names are not checked for duplicates; the server decides.
#[derive(Debug, Clone, Default)]
pub struct IndexBuilder {
    fields: Vec<IndexField>,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the fields added so far. The builder can keep growing afterwards.
    pub fn build(&self, index_name: impl Into<String>) -> Index {
        Index::new(index_name, self.fields.clone())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn add_text_field(&mut self, name: impl Into<String>, options: TextOptions) -> &mut Self {
        self.push(name, FieldType::Text, FieldOptions::Text(options))
    }

    pub fn add_u64_field(&mut self, name: impl Into<String>, options: NumericOptions) -> &mut Self {
        self.add_numeric_field(name, FieldType::U64, options)
    }

    pub fn add_i64_field(&mut self, name: impl Into<String>, options: NumericOptions) -> &mut Self {
        self.add_numeric_field(name, FieldType::I64, options)
    }

    pub fn add_f64_field(&mut self, name: impl Into<String>, options: NumericOptions) -> &mut Self {
        self.add_numeric_field(name, FieldType::F64, options)
    }

    pub fn add_bool_field(&mut self, name: impl Into<String>, options: NumericOptions) -> &mut Self {
        self.add_numeric_field(name, FieldType::Bool, options)
    }

    /// Add a field carrying numeric options under the given type.
    pub fn add_numeric_field(
        &mut self,
        name: impl Into<String>,
        field_type: FieldType,
        options: NumericOptions,
    ) -> &mut Self {
        if !field_type.is_numeric() {
            tracing::debug!(%field_type, "numeric options attached to a non-numeric field type");
        }
        self.push(name, field_type, FieldOptions::Numeric(options))
    }

    pub fn add_facet_field(&mut self, name: impl Into<String>, stored: bool) -> &mut Self {
        self.push(
            name,
            FieldType::Facet,
            FieldOptions::Facet(FacetOptions::new(stored)),
        )
    }

    fn push(&mut self, name: impl Into<String>, field_type: FieldType, options: FieldOptions) -> &mut Self {
        self.fields.push(IndexField {
            name: name.into(),
            field_type,
            options,
        });
        self
    }
}
