//! Request assembly and response parsing shared by both client façades.
//!
//! Each operation has a `*_request` function producing a [`PreparedRequest`]
//! and a `parse_*` function turning the [`RawResponse`] into its result.
//! The façades only move bytes between the two.

use reqwest::{Method, StatusCode};
use serde_json::{Map, Value};
use toshi_core::facet::search_body;
use toshi_core::{Document, FacetQuery, Index, IndexSummary, Query, ScoredDocument, TermQuery};

use crate::{ClientError, Result};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Body {
    Json(Value),
    /// Newline-delimited JSON, sent as-is.
    Text(String),
}

#[derive(Debug, Clone)]
pub(crate) struct PreparedRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<Body>,
}

#[derive(Debug)]
pub(crate) struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

type ErrorCtor = fn(u16, String) -> ClientError;

fn index_error(status: u16, message: String) -> ClientError {
    ClientError::Index { status, message }
}

fn document_error(status: u16, message: String) -> ClientError {
    ClientError::Document { status, message }
}

fn flush_error(status: u16, message: String) -> ClientError {
    ClientError::Flush { status, message }
}

fn query_error(status: u16, message: String) -> ClientError {
    ClientError::Query { status, message }
}

/// Strip one trailing slash from a base address.
pub(crate) fn normalize_base_url(url: impl Into<String>) -> String {
    let mut url = url.into();
    if url.ends_with('/') {
        url.pop();
    }
    url
}

/// The server's `message` field when the body carries one, else the raw body.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => match map.get("message") {
            Some(Value::String(message)) => message.clone(),
            Some(other) => other.to_string(),
            None => body.to_string(),
        },
        _ => body.to_string(),
    }
}

fn expect_status(response: &RawResponse, expected: StatusCode, make_error: ErrorCtor) -> Result<()> {
    if response.status == expected {
        return Ok(());
    }
    let message = error_message(&response.body);
    tracing::warn!(
        status = response.status.as_u16(),
        expected = expected.as_u16(),
        %message,
        "unexpected status from server"
    );
    Err(make_error(response.status.as_u16(), message))
}

fn json_body(response: &RawResponse) -> Result<Value> {
    Ok(serde_json::from_str(&response.body)?)
}

pub(crate) fn create_index_request(base_url: &str, index: &Index) -> PreparedRequest {
    PreparedRequest {
        method: Method::PUT,
        url: format!("{}/{}/_create", base_url, index.name()),
        body: Some(Body::Json(index.to_json())),
    }
}

pub(crate) fn parse_create_index(response: &RawResponse) -> Result<()> {
    expect_status(response, StatusCode::CREATED, index_error)
}

pub(crate) fn index_summary_request(base_url: &str, name: &str, include_sizes: bool) -> PreparedRequest {
    PreparedRequest {
        method: Method::GET,
        url: format!("{}/{}/_summary?include_sizes={}", base_url, name, include_sizes),
        body: None,
    }
}

pub(crate) fn parse_index_summary(name: &str, response: &RawResponse) -> Result<IndexSummary> {
    expect_status(response, StatusCode::OK, index_error)?;
    let body = json_body(response)?;
    let summaries = body
        .get("summaries")
        .ok_or_else(|| ClientError::InvalidResponse("summary response has no summaries".to_string()))?;
    Ok(IndexSummary::from_json(name, summaries)?)
}

pub(crate) fn add_document_request<D: Document>(
    base_url: &str,
    document: &D,
    commit: bool,
) -> Result<PreparedRequest> {
    let fields = document.to_fields()?;
    let body = serde_json::json!({
        "document": fields,
        "options": {"commit": commit},
    });
    Ok(PreparedRequest {
        method: Method::PUT,
        url: format!("{}/{}/", base_url, D::INDEX_NAME),
        body: Some(Body::Json(body)),
    })
}

pub(crate) fn parse_add_document(response: &RawResponse) -> Result<()> {
    expect_status(response, StatusCode::CREATED, document_error)
}

/// `None` when there is nothing to send.
pub(crate) fn bulk_insert_request<D: Document>(
    base_url: &str,
    documents: &[D],
) -> Result<Option<PreparedRequest>> {
    if documents.is_empty() {
        return Ok(None);
    }

    let mut lines = Vec::with_capacity(documents.len());
    for document in documents {
        lines.push(serde_json::to_string(&document.to_fields()?)?);
    }

    Ok(Some(PreparedRequest {
        method: Method::POST,
        url: format!("{}/{}/_bulk", base_url, D::INDEX_NAME),
        body: Some(Body::Text(lines.join("\n"))),
    }))
}

pub(crate) fn parse_bulk_insert(response: &RawResponse) -> Result<()> {
    expect_status(response, StatusCode::CREATED, document_error)
}

pub(crate) fn get_documents_request(base_url: &str, index_name: &str) -> PreparedRequest {
    PreparedRequest {
        method: Method::GET,
        url: format!("{}/{}/", base_url, index_name),
        body: None,
    }
}

pub(crate) fn parse_get_documents<D: Document>(response: &RawResponse) -> Result<Vec<ScoredDocument<D>>> {
    expect_status(response, StatusCode::OK, document_error)?;
    decode_docs(json_body(response)?)
}

pub(crate) fn delete_term_request(
    base_url: &str,
    terms: &[TermQuery],
    index_name: &str,
    commit: bool,
) -> PreparedRequest {
    let mut merged = Map::new();
    for term in terms {
        let (field, value) = term.term_entry();
        merged.insert(field.to_string(), Value::from(value));
    }

    PreparedRequest {
        method: Method::DELETE,
        url: format!("{}/{}/", base_url, index_name),
        body: Some(Body::Json(serde_json::json!({
            "terms": merged,
            "options": {"commit": commit},
        }))),
    }
}

pub(crate) fn parse_delete_term(response: &RawResponse) -> Result<u64> {
    expect_status(response, StatusCode::OK, document_error)?;
    json_body(response)?
        .get("docs_affected")
        .and_then(Value::as_u64)
        .ok_or_else(|| ClientError::InvalidResponse("delete response has no docs_affected".to_string()))
}

pub(crate) fn list_indexes_request(base_url: &str) -> PreparedRequest {
    PreparedRequest {
        method: Method::GET,
        url: format!("{}/_list/", base_url),
        body: None,
    }
}

pub(crate) fn parse_list_indexes(response: &RawResponse) -> Result<Vec<String>> {
    expect_status(response, StatusCode::OK, index_error)?;
    Ok(serde_json::from_str(&response.body)?)
}

/// Flush is a GET on the server side, even though it triggers a commit.
pub(crate) fn flush_request(base_url: &str, index_name: &str) -> PreparedRequest {
    PreparedRequest {
        method: Method::GET,
        url: format!("{}/{}/_flush/", base_url, index_name),
        body: None,
    }
}

pub(crate) fn parse_flush(response: &RawResponse) -> Result<()> {
    expect_status(response, StatusCode::OK, flush_error)
}

pub(crate) fn search_request(
    base_url: &str,
    index_name: &str,
    query: &Query,
    facets: Option<&[FacetQuery]>,
) -> PreparedRequest {
    PreparedRequest {
        method: Method::POST,
        url: format!("{}/{}/", base_url, index_name),
        body: Some(Body::Json(search_body(query, facets))),
    }
}

/// A `message` key means the server rejected the query, whatever the status.
pub(crate) fn parse_search<D: Document>(response: &RawResponse) -> Result<Vec<ScoredDocument<D>>> {
    let status = response.status.as_u16();
    let body: Value = match serde_json::from_str(&response.body) {
        Ok(body) => body,
        Err(_) if !response.status.is_success() => {
            return Err(query_error(status, response.body.clone()));
        }
        Err(err) => return Err(err.into()),
    };

    if let Some(message) = body.get("message") {
        let message = match message {
            Value::String(message) => message.clone(),
            other => other.to_string(),
        };
        tracing::warn!(status, %message, "search rejected by server");
        return Err(query_error(status, message));
    }
    if !response.status.is_success() {
        return Err(query_error(status, response.body.clone()));
    }

    decode_docs(body)
}

fn decode_docs<D: Document>(body: Value) -> Result<Vec<ScoredDocument<D>>> {
    let docs = match body {
        Value::Object(mut map) => match map.remove("docs") {
            Some(Value::Array(docs)) => docs,
            _ => return Err(ClientError::InvalidResponse("response has no docs array".to_string())),
        },
        _ => return Err(ClientError::InvalidResponse("response is not an object".to_string())),
    };

    docs.into_iter()
        .map(|entry| -> Result<ScoredDocument<D>> {
            let score = entry.get("score").and_then(Value::as_f64);
            let fields = match entry {
                Value::Object(mut entry) => match entry.remove("doc") {
                    Some(Value::Object(fields)) => fields,
                    _ => return Err(ClientError::InvalidResponse("doc entry without a doc object".to_string())),
                },
                _ => return Err(ClientError::InvalidResponse("doc entry is not an object".to_string())),
            };
            Ok(ScoredDocument {
                score,
                doc: D::from_fields(fields)?,
            })
        })
        .collect()
}
