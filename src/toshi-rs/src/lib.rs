//! Toshi Client Library
//!
//! HTTP client for the Toshi full-text search server. [`Client`] is the async
//! façade; with the `blocking` feature (on by default) [`BlockingClient`]
//! offers the same operations for synchronous callers. Both share one
//! request-assembly and response-parsing core, so they send identical
//! requests and map failures identically.

mod api;
#[cfg(feature = "blocking")]
mod blocking;
mod client;

#[cfg(feature = "blocking")]
pub use blocking::BlockingClient;
pub use client::Client;
pub use toshi_core::{
    BoolQuery, ClientConfig, Document, FacetQuery, FuzzyQuery, Index, IndexBuilder, IndexSummary,
    ModelError, PhraseQuery, Query, RangeQuery, RegexQuery, ScoredDocument, TermQuery,
};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("index request failed with status {status}: {message}")]
    Index { status: u16, message: String },

    #[error("document request failed with status {status}: {message}")]
    Document { status: u16, message: String },

    #[error("flush failed with status {status}: {message}")]
    Flush { status: u16, message: String },

    #[error("query rejected by server (status {status}): {message}")]
    Query { status: u16, message: String },

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// HTTP status of a server-reported failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Index { status, .. }
            | ClientError::Document { status, .. }
            | ClientError::Flush { status, .. }
            | ClientError::Query { status, .. } => Some(*status),
            ClientError::Request(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Message reported by the server, verbatim.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Index { message, .. }
            | ClientError::Document { message, .. }
            | ClientError::Flush { message, .. }
            | ClientError::Query { message, .. } => Some(message),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
