use serde::{Deserialize, Serialize};

/// How much posting information a text field records.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum IndexRecordOption {
    /// Only document ids.
    Basic,
    /// Document ids and term frequencies.
    Freq,
    /// Document ids, term frequencies and positions. Phrase queries need this.
    #[default]
    Position,
}

/// Indexing configuration of a text field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextIndexing {
    #[serde(default)]
    pub record: IndexRecordOption,
    #[serde(default = "default_true")]
    pub fieldnorms: bool,
    #[serde(default = "default_tokenizer")]
    pub tokenizer: String,
}

fn default_true() -> bool {
    true
}

fn default_tokenizer() -> String {
    "default".to_string()
}

impl Default for TextIndexing {
    fn default() -> Self {
        Self {
            record: IndexRecordOption::default(),
            fieldnorms: default_true(),
            tokenizer: default_tokenizer(),
        }
    }
}

impl TextIndexing {
    pub fn with_record(mut self, record: IndexRecordOption) -> Self {
        self.record = record;
        self
    }

    pub fn with_tokenizer(mut self, tokenizer: impl Into<String>) -> Self {
        self.tokenizer = tokenizer.into();
        self
    }

    pub fn fieldnorms(mut self, fieldnorms: bool) -> Self {
        self.fieldnorms = fieldnorms;
        self
    }
}

/// Options of a `text` field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextOptions {
    pub stored: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexed: Option<bool>,
    #[serde(default)]
    pub indexing: Option<TextIndexing>,
    /// Coerce non-string values into strings.
    #[serde(default)]
    pub coerce: bool,
}

impl TextOptions {
    pub fn new(stored: bool) -> Self {
        Self {
            stored,
            indexed: None,
            indexing: None,
            coerce: false,
        }
    }

    pub fn indexed(mut self, indexed: bool) -> Self {
        self.indexed = Some(indexed);
        self
    }

    pub fn with_indexing(mut self, indexing: TextIndexing) -> Self {
        self.indexing = Some(indexing);
        self
    }

    pub fn coerce(mut self, coerce: bool) -> Self {
        self.coerce = coerce;
        self
    }
}

/// Options shared by `u64`, `i64`, `f64` and `bool` fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NumericOptions {
    pub stored: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexed: Option<bool>,
    /// Only has an effect when the field is indexed.
    #[serde(default = "default_true")]
    pub fieldnorms: bool,
    #[serde(default)]
    pub coerce: bool,
}

impl NumericOptions {
    pub fn new(stored: bool) -> Self {
        Self {
            stored,
            indexed: None,
            fieldnorms: true,
            coerce: false,
        }
    }

    pub fn indexed(mut self, indexed: bool) -> Self {
        self.indexed = Some(indexed);
        self
    }

    pub fn fieldnorms(mut self, fieldnorms: bool) -> Self {
        self.fieldnorms = fieldnorms;
        self
    }

    pub fn coerce(mut self, coerce: bool) -> Self {
        self.coerce = coerce;
        self
    }
}

/// Options of a `facet` field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FacetOptions {
    pub stored: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexed: Option<bool>,
}

impl FacetOptions {
    pub fn new(stored: bool) -> Self {
        Self {
            stored,
            indexed: None,
        }
    }
}

/// Per-field options. Serializes as the bare variant attributes, without a tag.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum FieldOptions {
    Text(TextOptions),
    Numeric(NumericOptions),
    Facet(FacetOptions),
}

impl FieldOptions {
    pub fn stored(&self) -> bool {
        match self {
            FieldOptions::Text(o) => o.stored,
            FieldOptions::Numeric(o) => o.stored,
            FieldOptions::Facet(o) => o.stored,
        }
    }

    pub fn indexed(&self) -> Option<bool> {
        match self {
            FieldOptions::Text(o) => o.indexed,
            FieldOptions::Numeric(o) => o.indexed,
            FieldOptions::Facet(o) => o.indexed,
        }
    }
}
