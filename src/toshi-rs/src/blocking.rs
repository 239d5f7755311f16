use crate::api::{self, Body, PreparedRequest, RawResponse};
use crate::Result;
use reqwest::blocking::Client as HttpClient;
use toshi_core::{
    ClientConfig, Document, FacetQuery, Index, IndexSummary, Query, ScoredDocument, TermQuery,
};

/// Blocking Toshi REST API client.
///
/// Same operations and error mapping as [`crate::Client`]; every call holds
/// the calling thread until the exchange completes. Must not be used from
/// inside an async runtime.
#[derive(Debug, Clone)]
pub struct BlockingClient {
    base_url: String,
    client: HttpClient,
}

impl BlockingClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = HttpClient::builder().pool_max_idle_per_host(0).build()?;
        Ok(Self {
            base_url: api::normalize_base_url(base_url),
            client,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::new(config.url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn execute(&self, request: PreparedRequest) -> Result<RawResponse> {
        tracing::debug!(method = %request.method, url = %request.url, "sending request");

        let mut builder = self.client.request(request.method.clone(), &request.url);
        builder = match request.body {
            Some(Body::Json(body)) => builder.json(&body),
            Some(Body::Text(body)) => builder.body(body),
            None => builder,
        };

        let response = builder.send()?;
        let status = response.status();
        let body = response.text()?;

        tracing::debug!(method = %request.method, url = %request.url, status = status.as_u16(), "received response");
        Ok(RawResponse { status, body })
    }

    #[tracing::instrument(skip(self, index), fields(index_name = %index.name()))]
    pub fn create_index(&self, index: &Index) -> Result<()> {
        let response = self.execute(api::create_index_request(&self.base_url, index))?;
        api::parse_create_index(&response)
    }

    #[tracing::instrument(skip(self))]
    pub fn get_index_summary(&self, name: &str, include_sizes: bool) -> Result<IndexSummary> {
        let response = self.execute(api::index_summary_request(&self.base_url, name, include_sizes))?;
        api::parse_index_summary(name, &response)
    }

    #[tracing::instrument(skip(self, document), fields(index_name = D::INDEX_NAME))]
    pub fn add_document<D: Document>(&self, document: &D, commit: bool) -> Result<()> {
        let request = api::add_document_request(&self.base_url, document, commit)?;
        let response = self.execute(request)?;
        api::parse_add_document(&response)
    }

    #[tracing::instrument(skip(self, documents), fields(index_name = D::INDEX_NAME, count = documents.len()))]
    pub fn bulk_insert_documents<D: Document>(&self, documents: &[D], commit: bool) -> Result<()> {
        let Some(request) = api::bulk_insert_request(&self.base_url, documents)? else {
            tracing::debug!("no documents to insert");
            return Ok(());
        };
        let response = self.execute(request)?;
        api::parse_bulk_insert(&response)?;

        if commit {
            self.flush(D::INDEX_NAME)?;
        }
        Ok(())
    }

    pub fn get_documents<D: Document>(&self) -> Result<Vec<D>> {
        Ok(self
            .get_documents_scored::<D>()?
            .into_iter()
            .map(|scored| scored.doc)
            .collect())
    }

    #[tracing::instrument(skip(self), fields(index_name = D::INDEX_NAME))]
    pub fn get_documents_scored<D: Document>(&self) -> Result<Vec<ScoredDocument<D>>> {
        let response = self.execute(api::get_documents_request(&self.base_url, D::INDEX_NAME))?;
        api::parse_get_documents(&response)
    }

    #[tracing::instrument(skip(self, terms), fields(term_count = terms.len()))]
    pub fn delete_term(&self, terms: &[TermQuery], index_name: &str, commit: bool) -> Result<u64> {
        let response = self.execute(api::delete_term_request(&self.base_url, terms, index_name, commit))?;
        api::parse_delete_term(&response)
    }

    #[tracing::instrument(skip(self))]
    pub fn list_indexes(&self) -> Result<Vec<String>> {
        let response = self.execute(api::list_indexes_request(&self.base_url))?;
        api::parse_list_indexes(&response)
    }

    #[tracing::instrument(skip(self))]
    pub fn flush(&self, index_name: &str) -> Result<()> {
        let response = self.execute(api::flush_request(&self.base_url, index_name))?;
        api::parse_flush(&response)
    }

    pub fn search<D: Document>(&self, query: &Query, facets: Option<&[FacetQuery]>) -> Result<Vec<D>> {
        Ok(self
            .search_scored::<D>(query, facets)?
            .into_iter()
            .map(|scored| scored.doc)
            .collect())
    }

    #[tracing::instrument(skip(self, query, facets), fields(index_name = D::INDEX_NAME))]
    pub fn search_scored<D: Document>(
        &self,
        query: &Query,
        facets: Option<&[FacetQuery]>,
    ) -> Result<Vec<ScoredDocument<D>>> {
        let response = self.execute(api::search_request(&self.base_url, D::INDEX_NAME, query, facets))?;
        api::parse_search(&response)
    }
}
