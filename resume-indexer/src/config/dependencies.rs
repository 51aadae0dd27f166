//! Dependency initialization and wiring for the resume indexer.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::config::{AppConfig, ConnectionMode};
use crate::server::AppState;
use crate::IndexingError;
use resume_indexer_repository::{IndexConfig, OpenSearchProvider, SearchIndexProvider};
use resume_store_repository::{PostgresRecordStore, RecordStore};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// Shared state handed to the HTTP handlers.
    pub state: AppState,
}

impl Dependencies {
    /// Connect to the record store and the search backend, and make sure the
    /// table and the index exist.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(IndexingError)` - If the record store cannot be prepared, or the
    ///   search backend cannot be reached in fail-fast mode
    pub async fn new(config: &AppConfig) -> Result<Self, IndexingError> {
        info!(
            db_host = %config.store.host,
            db_name = %config.store.database,
            search_url = %config.search_url,
            index = %config.index.name,
            write_mode = ?config.index.write_mode,
            connection_mode = ?config.connection_mode,
            retry_interval_secs = config.retry_interval.as_secs(),
            "Initializing dependencies"
        );

        let store = PostgresRecordStore::connect(&config.store)
            .await
            .map_err(|e| IndexingError::config(format!("Failed to connect to PostgreSQL: {}", e)))?;

        store
            .ensure_schema()
            .await
            .map_err(|e| IndexingError::config(format!("Failed to create table: {}", e)))?;

        info!("Record store ready");

        let search_provider = Self::connect_to_search(
            &config.search_url,
            config.index.clone(),
            config.search_credentials.clone(),
            config.connection_mode,
            config.retry_interval,
        )
        .await?;

        info!("Search backend connection established");

        // Exits if the index cannot be created
        if search_provider
            .ensure_index_exists()
            .await
            .map_err(|e| IndexingError::config(format!("Failed to ensure index exists: {}", e)))?
        {
            info!(index = %config.index.name, "Created search index");
        }

        let state = AppState::new(Arc::new(store), Arc::new(search_provider));

        Ok(Self { state })
    }

    /// Connect to the search backend with retry logic based on connection mode.
    async fn connect_to_search(
        url: &str,
        index_config: IndexConfig,
        credentials: Option<(String, String)>,
        mode: ConnectionMode,
        retry_interval: Duration,
    ) -> Result<OpenSearchProvider, IndexingError> {
        loop {
            match Self::try_connect_search(url, index_config.clone(), credentials.clone()).await {
                Ok(provider) => return Ok(provider),
                Err(e) => match mode {
                    ConnectionMode::FailFast => {
                        return Err(IndexingError::config(format!(
                            "Failed to connect to search backend: {}",
                            e
                        )));
                    }
                    ConnectionMode::Retry => {
                        warn!(
                            search_url = %url,
                            error = %e,
                            retry_interval_secs = retry_interval.as_secs(),
                            "Failed to connect to search backend, retrying..."
                        );
                        sleep(retry_interval).await;
                    }
                },
            }
        }
    }

    /// Attempt to connect to the search backend.
    async fn try_connect_search(
        url: &str,
        index_config: IndexConfig,
        credentials: Option<(String, String)>,
    ) -> Result<OpenSearchProvider, IndexingError> {
        let provider = OpenSearchProvider::new(url, index_config, credentials)
            .await
            .map_err(|e| IndexingError::config(format!("Failed to create search provider: {}", e)))?;

        let reachable = provider
            .ping()
            .await
            .map_err(|e| IndexingError::config(e.to_string()))?;
        if !reachable {
            return Err(IndexingError::config(format!("{} did not answer a ping", url)));
        }

        Ok(provider)
    }
}
