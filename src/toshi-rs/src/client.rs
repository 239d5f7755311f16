use crate::api::{self, Body, PreparedRequest, RawResponse};
use crate::Result;
use reqwest::Client as HttpClient;
use toshi_core::{
    ClientConfig, Document, FacetQuery, Index, IndexSummary, Query, ScoredDocument, TermQuery,
};

/// Async Toshi REST API client.
///
/// Holds only the base address. No connection is kept idle between calls, so
/// each operation runs over a fresh connection. Cheap to share between tasks.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    client: HttpClient,
}

impl Client {
    /// Create a new client for the given base URL. A trailing slash is dropped.
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

    async fn execute(&self, request: PreparedRequest) -> Result<RawResponse> {
        tracing::debug!(method = %request.method, url = %request.url, "sending request");

        let mut builder = self.client.request(request.method.clone(), &request.url);
        builder = match request.body {
            Some(Body::Json(body)) => builder.json(&body),
            Some(Body::Text(body)) => builder.body(body),
            None => builder,
        };

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        tracing::debug!(method = %request.method, url = %request.url, status = status.as_u16(), "received response");
        Ok(RawResponse { status, body })
    }

    /// Create an index from its schema. Fails if the index already exists.
    #[tracing::instrument(skip(self, index), fields(index_name = %index.name()))]
    pub async fn create_index(&self, index: &Index) -> Result<()> {
        let response = self
            .execute(api::create_index_request(&self.base_url, index))
            .await?;
        api::parse_create_index(&response)
    }

    /// Fetch the summary of an index, including its reconstructed schema.
    #[tracing::instrument(skip(self))]
    pub async fn get_index_summary(&self, name: &str, include_sizes: bool) -> Result<IndexSummary> {
        let response = self
            .execute(api::index_summary_request(&self.base_url, name, include_sizes))
            .await?;
        api::parse_index_summary(name, &response)
    }

    /// Add one document to its index.
    #[tracing::instrument(skip(self, document), fields(index_name = D::INDEX_NAME))]
    pub async fn add_document<D: Document>(&self, document: &D, commit: bool) -> Result<()> {
        let request = api::add_document_request(&self.base_url, document, commit)?;
        let response = self.execute(request).await?;
        api::parse_add_document(&response)
    }

    /// Insert many documents in one request, then flush when `commit` is set.
    #[tracing::instrument(skip(self, documents), fields(index_name = D::INDEX_NAME, count = documents.len()))]
    pub async fn bulk_insert_documents<D: Document>(&self, documents: &[D], commit: bool) -> Result<()> {
        let Some(request) = api::bulk_insert_request(&self.base_url, documents)? else {
            tracing::debug!("no documents to insert");
            return Ok(());
        };
        let response = self.execute(request).await?;
        api::parse_bulk_insert(&response)?;

        if commit {
            self.flush(D::INDEX_NAME).await?;
        }
        Ok(())
    }

    /// Retrieve all documents of `D`'s index.
    pub async fn get_documents<D: Document>(&self) -> Result<Vec<D>> {
        Ok(self
            .get_documents_scored::<D>()
            .await?
            .into_iter()
            .map(|scored| scored.doc)
            .collect())
    }

    /// Retrieve all documents of `D`'s index along with their scores.
    #[tracing::instrument(skip(self), fields(index_name = D::INDEX_NAME))]
    pub async fn get_documents_scored<D: Document>(&self) -> Result<Vec<ScoredDocument<D>>> {
        let response = self
            .execute(api::get_documents_request(&self.base_url, D::INDEX_NAME))
            .await?;
        api::parse_get_documents(&response)
    }

    /// Delete every document matching the merged terms. Returns the number removed.
    #[tracing::instrument(skip(self, terms), fields(term_count = terms.len()))]
    pub async fn delete_term(&self, terms: &[TermQuery], index_name: &str, commit: bool) -> Result<u64> {
        let response = self
            .execute(api::delete_term_request(&self.base_url, terms, index_name, commit))
            .await?;
        api::parse_delete_term(&response)
    }

    /// Names of all indexes on the server.
    #[tracing::instrument(skip(self))]
    pub async fn list_indexes(&self) -> Result<Vec<String>> {
        let response = self.execute(api::list_indexes_request(&self.base_url)).await?;
        api::parse_list_indexes(&response)
    }

    /// Make pending writes of an index visible to search.
    #[tracing::instrument(skip(self))]
    pub async fn flush(&self, index_name: &str) -> Result<()> {
        let response = self
            .execute(api::flush_request(&self.base_url, index_name))
            .await?;
        api::parse_flush(&response)
    }

    /// Search `D`'s index.
    pub async fn search<D: Document>(&self, query: &Query, facets: Option<&[FacetQuery]>) -> Result<Vec<D>> {
        Ok(self
            .search_scored::<D>(query, facets)
            .await?
            .into_iter()
            .map(|scored| scored.doc)
            .collect())
    }

    /// Search `D`'s index, keeping the score of every hit.
    #[tracing::instrument(skip(self, query, facets), fields(index_name = D::INDEX_NAME))]
    pub async fn search_scored<D: Document>(
        &self,
        query: &Query,
        facets: Option<&[FacetQuery]>,
    ) -> Result<Vec<ScoredDocument<D>>> {
        let response = self
            .execute(api::search_request(&self.base_url, D::INDEX_NAME, query, facets))
            .await?;
        api::parse_search(&response)
    }
}
