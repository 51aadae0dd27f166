//! Ingest guard.
//!
//! The write path into the record store. Uploads are validated here, skipped
//! when their name is already stored, and inserted otherwise.

use std::path::Path;
use std::sync::Arc;

use resume_store_repository::RecordStore;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::errors::IngestError;

/// Extension every uploaded file name must carry.
const JSON_EXTENSION: &str = ".json";

/// Result of storing one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadOutcome {
    /// The document was stored.
    Inserted,
    /// A document with the same name was already stored; nothing was written.
    AlreadyExists,
    /// A concurrent upload of the same name won the insert.
    Conflict,
}

/// A folder entry that could not be uploaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FolderUploadFailure {
    pub file_name: String,
    pub error: String,
}

/// Outcome of a folder upload, by file name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FolderUploadSummary {
    pub uploaded: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<FolderUploadFailure>,
}

/// Validates uploads and writes them to the record store.
#[derive(Clone)]
pub struct IngestGuard {
    store: Arc<dyn RecordStore>,
}

impl IngestGuard {
    /// Create a new ingest guard over the given store.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Store one uploaded file.
    ///
    /// # Errors
    ///
    /// * `IngestError::InvalidInput` - The name does not end in `.json`, or the
    ///   body is not a JSON object
    /// * `IngestError::Store` - The record store failed
    #[instrument(skip(self, body), fields(size = body.len()))]
    pub async fn upload(&self, file_name: &str, body: &[u8]) -> Result<UploadOutcome, IngestError> {
        if !file_name.ends_with(JSON_EXTENSION) {
            return Err(IngestError::invalid_input(format!(
                "{} is not a JSON file",
                file_name
            )));
        }

        let resume_data = parse_document(body)
            .map_err(|e| IngestError::invalid_input(format!("{}: {}", file_name, e)))?;

        self.store_document(file_name, &resume_data).await
    }

    /// Store every `*.json` file of a directory, in file name order.
    ///
    /// Files that cannot be read, parsed or stored are reported in the summary and
    /// the rest of the folder is still processed. An unreachable record store stops
    /// the upload; files stored before it stay stored.
    ///
    /// # Errors
    ///
    /// * `IngestError::InvalidInput` - The path is missing, is not a directory,
    ///   or holds no JSON files
    /// * `IngestError::Store` - The record store could not be reached
    #[instrument(skip(self, folder), fields(folder = %folder.as_ref().display()))]
    pub async fn upload_folder(
        &self,
        folder: impl AsRef<Path>,
    ) -> Result<FolderUploadSummary, IngestError> {
        let folder = folder.as_ref();
        let file_names = list_json_files(folder).await?;

        let mut summary = FolderUploadSummary::default();
        for file_name in file_names {
            match self.store.exists(&file_name).await {
                Ok(true) => {
                    debug!(file_name = %file_name, "File already exists, skipping");
                    summary.skipped.push(file_name);
                    continue;
                }
                Ok(false) => {}
                Err(e) if e.is_unavailable() => return Err(e.into()),
                Err(e) => {
                    warn!(file_name = %file_name, error = %e, "Existence check failed");
                    summary.failed.push(FolderUploadFailure {
                        file_name,
                        error: e.to_string(),
                    });
                    continue;
                }
            }

            let document = match tokio::fs::read(folder.join(&file_name)).await {
                Ok(bytes) => parse_document(&bytes),
                Err(e) => Err(e.to_string()),
            };

            let resume_data = match document {
                Ok(value) => value,
                Err(error) => {
                    warn!(file_name = %file_name, error = %error, "Skipping unreadable file");
                    summary.failed.push(FolderUploadFailure { file_name, error });
                    continue;
                }
            };

            match self.insert(&file_name, &resume_data).await {
                Ok(UploadOutcome::Inserted) => summary.uploaded.push(file_name),
                Ok(UploadOutcome::AlreadyExists | UploadOutcome::Conflict) => {
                    summary.skipped.push(file_name)
                }
                Err(IngestError::Store(e)) if !e.is_unavailable() => {
                    warn!(file_name = %file_name, error = %e, "Store rejected file");
                    summary.failed.push(FolderUploadFailure {
                        file_name,
                        error: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            uploaded = summary.uploaded.len(),
            skipped = summary.skipped.len(),
            failed = summary.failed.len(),
            "Folder upload finished"
        );

        Ok(summary)
    }

    async fn store_document(
        &self,
        file_name: &str,
        resume_data: &Value,
    ) -> Result<UploadOutcome, IngestError> {
        if self.store.exists(file_name).await? {
            info!(file_name = %file_name, "File already exists, skipping insert");
            return Ok(UploadOutcome::AlreadyExists);
        }

        self.insert(file_name, resume_data).await
    }

    async fn insert(&self, file_name: &str, resume_data: &Value) -> Result<UploadOutcome, IngestError> {
        match self.store.insert(file_name, resume_data).await {
            Ok(()) => {
                info!(file_name = %file_name, "Stored resume");
                Ok(UploadOutcome::Inserted)
            }
            Err(e) if e.is_conflict() => {
                warn!(file_name = %file_name, "Concurrent upload stored this name first");
                Ok(UploadOutcome::Conflict)
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Parse an uploaded body, accepting only JSON objects.
fn parse_document(body: &[u8]) -> Result<Value, String> {
    let value: Value = serde_json::from_slice(body).map_err(|e| format!("Invalid JSON: {}", e))?;
    if value.is_object() {
        Ok(value)
    } else {
        Err("Resume must be a JSON object".to_string())
    }
}

/// Names of the `*.json` files directly inside `folder`, sorted.
async fn list_json_files(folder: &Path) -> Result<Vec<String>, IngestError> {
    let metadata = tokio::fs::metadata(folder).await.map_err(|_| {
        IngestError::invalid_input(format!("Folder path {} does not exist", folder.display()))
    })?;
    if !metadata.is_dir() {
        return Err(IngestError::invalid_input(format!(
            "{} is not a directory",
            folder.display()
        )));
    }

    let mut entries = tokio::fs::read_dir(folder).await.map_err(|e| {
        IngestError::invalid_input(format!("Cannot read {}: {}", folder.display(), e))
    })?;

    let mut file_names = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(|e| {
        IngestError::invalid_input(format!("Cannot read {}: {}", folder.display(), e))
    })? {
        let is_file = entry.file_type().await.map(|t| t.is_file()).unwrap_or(false);
        if !is_file {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if name.ends_with(JSON_EXTENSION) {
                file_names.push(name.to_string());
            }
        }
    }

    if file_names.is_empty() {
        return Err(IngestError::invalid_input(format!(
            "No JSON files found in {}",
            folder.display()
        )));
    }

    file_names.sort();
    Ok(file_names)
}
