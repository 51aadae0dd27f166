// HTTP error responses
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use resume_indexer_repository::SearchIndexError;
use resume_store_repository::RecordStoreError;
use serde_json::json;
use tracing::error;

use crate::errors::IngestError;

/// Error returned by every handler, rendered as `{"status": "error", "message": ...}`.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unavailable(String),
    Internal(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest(msg)
            | Self::NotFound(msg)
            | Self::Conflict(msg)
            | Self::Unavailable(msg)
            | Self::Internal(msg) => msg,
        }
    }
}

impl From<SearchIndexError> for ApiError {
    fn from(err: SearchIndexError) -> Self {
        let msg = err.to_string();
        match err {
            SearchIndexError::ValidationError(_) => Self::BadRequest(msg),
            SearchIndexError::IndexNotFound(_) => Self::NotFound(msg),
            SearchIndexError::ConnectionError(_) => Self::Unavailable(msg),
            _ => Self::Internal(msg),
        }
    }
}

impl From<RecordStoreError> for ApiError {
    fn from(err: RecordStoreError) -> Self {
        let msg = err.to_string();
        if err.is_conflict() {
            Self::Conflict(msg)
        } else if err.is_unavailable() {
            Self::Unavailable(msg)
        } else if err.is_rejected() {
            Self::BadRequest(msg)
        } else {
            Self::Internal(msg)
        }
    }
}

impl From<IngestError> for ApiError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::InvalidInput(msg) => Self::BadRequest(msg),
            IngestError::Store(e) => e.into(),
            IngestError::Search(e) => e.into(),
            IngestError::DecodeError(_) => Self::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = %status, error = %self.message(), "Request failed");
        }

        (
            status,
            Json(json!({
                "status": "error",
                "message": self.message(),
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from(SearchIndexError::validation("keyword cannot be empty")).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(SearchIndexError::index_not_found("resumes")).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(SearchIndexError::connection("refused")).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::from(IngestError::invalid_input("bad.txt")).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(IngestError::Store(RecordStoreError::DatabaseError(
                sqlx::Error::PoolTimedOut
            )))
            .status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::from(RecordStoreError::Conflict("a.json".to_string())).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(RecordStoreError::DatabaseError(sqlx::Error::Protocol(
                "unexpected message".to_string()
            )))
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
