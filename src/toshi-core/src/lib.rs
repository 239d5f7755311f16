//! Toshi Client Core Library
//!
//! This crate provides the model side of the Toshi client, including:
//! - Index schemas, field options and the index builder
//! - Index summaries decoded from server responses
//! - The query grammar and facet filters
//! - The document contract used by the request builders
//! - Client configuration

pub mod builder;
pub mod config;
pub mod document;
pub mod error;
pub mod facet;
pub mod field_options;
pub mod index;
pub mod query;
pub mod summary;

// Re-export commonly used types
pub use builder::IndexBuilder;
pub use config::ClientConfig;
pub use document::{Document, ScoredDocument};
pub use error::ModelError;
pub use facet::FacetQuery;
pub use field_options::*;
pub use index::{FieldType, Index, IndexField};
pub use query::*;
pub use summary::{IndexSettings, IndexSummary};
