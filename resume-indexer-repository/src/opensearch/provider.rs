//! OpenSearch provider implementation.
//!
//! This module provides the concrete implementation of `SearchIndexProvider`
//! using the OpenSearch Rust crate.

use std::time::Duration;

use async_trait::async_trait;
use opensearch::{
    auth::Credentials,
    http::response::Response,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesDeleteParts, IndicesExistsParts},
    DeleteByQueryParts, IndexParts, OpenSearch, SearchParts,
};
use resume_indexer_shared::{IndexedDocument, SearchQuery, SearchResults};
use serde_json::{json, Value};
use tracing::{debug, error, info, warn};
use url::Url;

use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndexProvider;
use crate::opensearch::index_config::{get_index_settings, IndexConfig, WriteMode};
use crate::opensearch::queries::{build_search_body, parse_search_response};
use crate::types::DeleteOutcome;

/// Upper bound for a single request to the search backend.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// OpenSearch provider implementation.
///
/// The client is immutable and cheap to clone; the transport pools HTTP
/// connections underneath, so each operation is an independent request.
///
/// # Example
///
/// ```ignore
/// use resume_indexer_repository::opensearch::{IndexConfig, OpenSearchProvider};
///
/// let provider = OpenSearchProvider::new("http://localhost:9200", IndexConfig::default(), None).await?;
/// provider.ensure_index_exists().await?;
/// ```
#[derive(Clone)]
pub struct OpenSearchProvider {
    client: OpenSearch,
    index_config: IndexConfig,
}

impl OpenSearchProvider {
    /// Create a new OpenSearch provider connected to the specified URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The server URL (e.g., "http://localhost:9200")
    /// * `index_config` - The index name and write mode
    /// * `credentials` - Optional basic-auth `(username, password)`
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchProvider)` - A new provider instance
    /// * `Err(SearchIndexError)` - If the URL is invalid or transport setup fails
    pub async fn new(
        url: &str,
        index_config: IndexConfig,
        credentials: Option<(String, String)>,
    ) -> Result<Self, SearchIndexError> {
        let parsed_url =
            Url::parse(url).map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let mut builder = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .timeout(REQUEST_TIMEOUT);
        let authenticated = credentials.is_some();
        if let Some((username, password)) = credentials {
            builder = builder.auth(Credentials::Basic(username, password));
        }
        let transport = builder
            .build()
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(
            url = %url,
            index = %index_config.name,
            write_mode = ?index_config.write_mode,
            authenticated,
            "Created OpenSearch provider"
        );

        Ok(Self {
            client,
            index_config,
        })
    }

    /// The configured index name.
    pub fn index_name(&self) -> &str {
        &self.index_config.name
    }

    /// Read the body of a failed response for error reporting.
    async fn error_body(response: Response) -> String {
        response.text().await.unwrap_or_default()
    }
}

#[async_trait]
impl SearchIndexProvider for OpenSearchProvider {
    async fn ensure_index_exists(&self) -> Result<bool, SearchIndexError> {
        if self.index_exists().await? {
            info!(index = %self.index_config.name, "Index already exists");
            return Ok(false);
        }

        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(&self.index_config.name))
            .body(get_index_settings())
            .send()
            .await
            .map_err(|e| SearchIndexError::index_creation(e.to_string()))?;

        let status = response.status_code();
        if status.is_success() {
            info!(index = %self.index_config.name, "Index created successfully");
            return Ok(true);
        }

        let error_body = Self::error_body(response).await;
        // Another instance created it between the existence check and the create call.
        if status.as_u16() == 400 && error_body.contains("resource_already_exists_exception") {
            info!(index = %self.index_config.name, "Index already exists");
            return Ok(false);
        }

        error!(status = %status, body = %error_body, "Index creation failed");
        Err(SearchIndexError::index_creation(format!(
            "Index creation failed with status {}: {}",
            status, error_body
        )))
    }

    async fn ping(&self) -> Result<bool, SearchIndexError> {
        match self.client.ping().send().await {
            Ok(response) => Ok(response.status_code().is_success()),
            Err(e) => {
                warn!(error = %e, "Ping to search backend failed");
                Ok(false)
            }
        }
    }

    async fn index_exists(&self) -> Result<bool, SearchIndexError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[self.index_config.name.as_str()]))
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        match response.status_code().as_u16() {
            200 => Ok(true),
            404 => Ok(false),
            other => {
                let error_body = Self::error_body(response).await;
                Err(SearchIndexError::connection(format!(
                    "Index existence check failed with status {}: {}",
                    other, error_body
                )))
            }
        }
    }

    async fn index_document(&self, document: &IndexedDocument) -> Result<(), SearchIndexError> {
        let body = serde_json::to_value(document)
            .map_err(|e| SearchIndexError::serialization(e.to_string()))?;

        let index = self.index_config.name.as_str();
        let parts = match self.index_config.write_mode {
            WriteMode::Upsert => IndexParts::IndexId(index, &document.file_name),
            WriteMode::Append => IndexParts::Index(index),
        };

        let response = self
            .client
            .index(parts)
            .body(body)
            .send()
            .await
            .map_err(|e| SearchIndexError::index(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = Self::error_body(response).await;
            error!(
                status = %status,
                file_name = %document.file_name,
                body = %error_body,
                "Index request failed"
            );
            return Err(SearchIndexError::index(format!(
                "Index failed with status {}: {}",
                status, error_body
            )));
        }

        debug!(file_name = %document.file_name, "Document indexed");
        Ok(())
    }

    async fn delete_all_documents(&self) -> Result<DeleteOutcome, SearchIndexError> {
        if !self.index_exists().await? {
            info!(index = %self.index_config.name, "Index does not exist");
            return Ok(DeleteOutcome::IndexMissing);
        }

        let response = self
            .client
            .delete_by_query(DeleteByQueryParts::Index(&[self.index_config.name.as_str()]))
            .refresh(true)
            .body(json!({ "query": { "match_all": {} } }))
            .send()
            .await
            .map_err(|e| SearchIndexError::delete(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = Self::error_body(response).await;
            error!(status = %status, body = %error_body, "Delete by query failed");
            return Err(SearchIndexError::delete(format!(
                "Delete by query failed with status {}: {}",
                status, error_body
            )));
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| SearchIndexError::parse(e.to_string()))?;
        info!(
            index = %self.index_config.name,
            deleted = body["deleted"].as_u64().unwrap_or(0),
            "All documents deleted from index"
        );
        Ok(DeleteOutcome::Deleted)
    }

    async fn delete_index(&self) -> Result<DeleteOutcome, SearchIndexError> {
        if !self.index_exists().await? {
            info!(index = %self.index_config.name, "Index does not exist");
            return Ok(DeleteOutcome::IndexMissing);
        }

        let response = self
            .client
            .indices()
            .delete(IndicesDeleteParts::Index(&[self.index_config.name.as_str()]))
            .send()
            .await
            .map_err(|e| SearchIndexError::delete(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() && status.as_u16() != 404 {
            let error_body = Self::error_body(response).await;
            error!(status = %status, body = %error_body, "Delete index request failed");
            return Err(SearchIndexError::delete(format!(
                "Delete index failed with status {}: {}",
                status, error_body
            )));
        }

        info!(index = %self.index_config.name, "Index deleted successfully");
        Ok(DeleteOutcome::Deleted)
    }

    async fn search(&self, query: &SearchQuery) -> Result<SearchResults, SearchIndexError> {
        let body = build_search_body(query);
        debug!(query = %body, "Running search");

        let response = self
            .client
            .search(SearchParts::Index(&[self.index_config.name.as_str()]))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchIndexError::search(e.to_string()))?;

        let status = response.status_code();
        if status.as_u16() == 404 {
            return Err(SearchIndexError::index_not_found(&self.index_config.name));
        }
        if !status.is_success() {
            let error_body = Self::error_body(response).await;
            error!(status = %status, body = %error_body, "Search request failed");
            return Err(SearchIndexError::search(format!(
                "Search failed with status {}: {}",
                status, error_body
            )));
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|e| SearchIndexError::parse(e.to_string()))?;

        parse_search_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_new_rejects_invalid_url() {
        let result = OpenSearchProvider::new("not a url", IndexConfig::default(), None).await;
        assert!(matches!(result, Err(SearchIndexError::ConnectionError(_))));
    }

    #[tokio::test]
    async fn test_new_with_credentials() {
        let provider = OpenSearchProvider::new(
            "http://localhost:9200",
            IndexConfig::new("candidates", WriteMode::Append),
            Some(("elastic".to_string(), "changeme".to_string())),
        )
        .await
        .unwrap();

        assert_eq!(provider.index_name(), "candidates");
    }
}
