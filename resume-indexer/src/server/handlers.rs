// HTTP request handlers
use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use resume_indexer_shared::SearchQuery;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::ingest::UploadOutcome;
use crate::server::error::ApiError;
use crate::server::state::AppState;

type ApiResult = Result<(StatusCode, Json<Value>), ApiError>;

#[derive(Debug, Deserialize)]
pub struct FolderParams {
    pub folder_path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NameParams {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct KeywordParams {
    #[serde(default)]
    pub keyword: String,
    pub min_experience: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ContextParams {
    #[serde(default)]
    pub prompt: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    #[serde(default)]
    pub delete_index: bool,
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

/// Single upload - stores the multipart `file` field unless its name is already stored
pub async fn upload_json_file(State(state): State<AppState>, mut multipart: Multipart) -> ApiResult {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read upload: {}", e)))?;
        upload = Some((file_name, bytes));
        break;
    }

    let (file_name, bytes) = upload.ok_or_else(|| ApiError::bad_request("No file provided"))?;
    info!(file_name = %file_name, size = bytes.len(), "Received upload");

    let response = match state.ingest.upload(&file_name, &bytes).await? {
        UploadOutcome::Inserted => (
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "inserted": true,
                "message": format!("Inserted {} into the database.", file_name)
            })),
        ),
        UploadOutcome::AlreadyExists => (
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "inserted": false,
                "message": "File already exists. Skipping insert."
            })),
        ),
        UploadOutcome::Conflict => (
            StatusCode::CONFLICT,
            Json(json!({
                "status": "conflict",
                "inserted": false,
                "message": format!("{} was stored by a concurrent upload.", file_name)
            })),
        ),
    };

    Ok(response)
}

/// Folder upload - stores every `*.json` file of a server-side directory
pub async fn upload_folder(
    State(state): State<AppState>,
    Query(params): Query<FolderParams>,
) -> ApiResult {
    let folder_path = params
        .folder_path
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("folder_path is required"))?;

    let summary = state.ingest.upload_folder(&folder_path).await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "status": "success",
            "message": format!(
                "Uploaded {} files, skipped {}, failed {}",
                summary.uploaded.len(),
                summary.skipped.len(),
                summary.failed.len()
            ),
            "uploaded": summary.uploaded,
            "skipped": summary.skipped,
            "failed": summary.failed,
        })),
    ))
}

/// Search backend connectivity
pub async fn check_connection(State(state): State<AppState>) -> ApiResult {
    let health = state.search.health().await?;
    if !health.connected {
        return Err(ApiError::Unavailable(
            "Search backend is not reachable".to_string(),
        ));
    }

    Ok((
        StatusCode::OK,
        Json(json!({
            "status": "success",
            "connected": health.connected,
            "index_exists": health.index_exists,
        })),
    ))
}

/// Full re-sync of the search index from the record store
pub async fn index_data(State(state): State<AppState>) -> ApiResult {
    let report = state.synchronizer.sync_all().await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "status": "success",
            "message": format!("Indexed {} of {} records", report.indexed, report.total),
            "total": report.total,
            "indexed": report.indexed,
            "failed": report.failed,
        })),
    ))
}

async fn run_search(state: &AppState, query: SearchQuery) -> ApiResult {
    let results = state.search.search(query).await?;
    let matched = results.matched();
    let message = if matched == 0 {
        "No matching resumes found".to_string()
    } else {
        format!("Found {} matching resumes", matched)
    };

    Ok((
        StatusCode::OK,
        Json(json!({
            "status": "success",
            "message": message,
            "total": results.total,
            "matched_count": matched,
            "data": results.documents,
        })),
    ))
}

/// First page of every indexed document
pub async fn get_all_data(State(state): State<AppState>) -> ApiResult {
    run_search(&state, SearchQuery::MatchAll).await
}

pub async fn search_by_name(
    State(state): State<AppState>,
    Query(params): Query<NameParams>,
) -> ApiResult {
    run_search(&state, SearchQuery::by_name(params.name)).await
}

pub async fn search_with_keywords(
    State(state): State<AppState>,
    Query(params): Query<KeywordParams>,
) -> ApiResult {
    run_search(
        &state,
        SearchQuery::keywords(params.keyword, params.min_experience),
    )
    .await
}

pub async fn search_by_context(
    State(state): State<AppState>,
    Query(params): Query<ContextParams>,
) -> ApiResult {
    run_search(&state, SearchQuery::context(params.prompt)).await
}

/// Clears the search index; the record store is left untouched
pub async fn delete_all_data(
    State(state): State<AppState>,
    Query(params): Query<DeleteParams>,
) -> ApiResult {
    let outcome = state.search.delete_all(params.delete_index).await?;
    let message = if params.delete_index {
        "Search index deleted"
    } else {
        "All documents deleted from the search index"
    };

    Ok((
        StatusCode::OK,
        Json(json!({
            "status": "success",
            "message": message,
            "outcome": outcome,
        })),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{MockRecordStore, MockSearchProvider};
    use axum::body::Body;
    use axum::extract::FromRequest;
    use axum::http::{header, Request};
    use std::sync::Arc;

    fn state_with(store: MockRecordStore, provider: MockSearchProvider) -> AppState {
        AppState::new(Arc::new(store), Arc::new(provider))
    }

    async fn multipart(file_name: &str, content: &str) -> Multipart {
        let boundary = "resume-boundary";
        let body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/json\r\n\r\n{content}\r\n--{boundary}--\r\n"
        );
        let request = Request::builder()
            .method("POST")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", boundary),
            )
            .body(Body::from(body))
            .unwrap();

        Multipart::from_request(request, &()).await.unwrap()
    }

    #[tokio::test]
    async fn test_upload_json_file() {
        let state = state_with(MockRecordStore::new(), MockSearchProvider::new());

        let (status, Json(body)) = upload_json_file(
            State(state.clone()),
            multipart("ann.json", r#"{"Name": "Ann"}"#).await,
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["inserted"], json!(true));

        let (status, Json(body)) = upload_json_file(
            State(state),
            multipart("ann.json", r#"{"Name": "Ann"}"#).await,
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["inserted"], json!(false));
        assert_eq!(body["message"], json!("File already exists. Skipping insert."));
    }

    #[tokio::test]
    async fn test_upload_rejects_non_json_name() {
        let state = state_with(MockRecordStore::new(), MockSearchProvider::new());

        let result = upload_json_file(State(state), multipart("ann.txt", "{}").await).await;

        assert_eq!(result.unwrap_err().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_race_returns_conflict() {
        let state = state_with(MockRecordStore::new().racing(), MockSearchProvider::new());

        let (status, Json(body)) = upload_json_file(
            State(state),
            multipart("ann.json", r#"{"Name": "Ann"}"#).await,
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["status"], json!("conflict"));
    }

    #[tokio::test]
    async fn test_upload_folder_requires_path() {
        let state = state_with(MockRecordStore::new(), MockSearchProvider::new());

        let result = upload_folder(State(state), Query(FolderParams { folder_path: None })).await;

        assert_eq!(result.unwrap_err().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_check_connection() {
        let state = state_with(MockRecordStore::new(), MockSearchProvider::new());
        let (status, Json(body)) = check_connection(State(state)).await.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["index_exists"], json!(true));

        let state = state_with(MockRecordStore::new(), MockSearchProvider::new().unreachable());
        let result = check_connection(State(state)).await;
        assert_eq!(result.unwrap_err().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_index_then_search() {
        let state = state_with(MockRecordStore::new(), MockSearchProvider::new());
        state
            .ingest
            .upload("ann.json", br#"{"Name": "Ann", "Skills": ["Rust"]}"#)
            .await
            .unwrap();

        let (_, Json(body)) = index_data(State(state.clone())).await.unwrap();
        assert_eq!(body["indexed"], json!(1));

        let (_, Json(body)) = search_by_name(
            State(state.clone()),
            Query(NameParams {
                name: "Ann".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(body["total"], json!(1));
        assert_eq!(body["data"][0]["file_name"], json!("ann.json"));

        let (_, Json(body)) = get_all_data(State(state)).await.unwrap();
        assert_eq!(body["total"], json!(1));
    }

    #[tokio::test]
    async fn test_search_reports_matched_count() {
        let state = state_with(MockRecordStore::new(), MockSearchProvider::new());
        for (name, body) in [
            ("ann.json", r#"{"Name": "Ann", "Skills": ["Rust", "Go"]}"#),
            ("bob.json", r#"{"Name": "Bob", "Skills": ["Rust"]}"#),
            ("cat.json", r#"{"Name": "Cat", "Skills": ["Java"]}"#),
        ] {
            state.ingest.upload(name, body.as_bytes()).await.unwrap();
        }
        index_data(State(state.clone())).await.unwrap();

        let (status, Json(body)) = search_with_keywords(
            State(state.clone()),
            Query(KeywordParams {
                keyword: "rust".to_string(),
                min_experience: None,
            }),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["matched_count"], json!(2));
        assert_eq!(body["message"], json!("Found 2 matching resumes"));
        assert_eq!(body["data"].as_array().unwrap().len(), 2);

        let (_, Json(body)) = search_by_name(
            State(state),
            Query(NameParams {
                name: "Dan".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(body["matched_count"], json!(0));
        assert_eq!(body["message"], json!("No matching resumes found"));
    }

    #[tokio::test]
    async fn test_empty_search_is_bad_request() {
        let state = state_with(MockRecordStore::new(), MockSearchProvider::new());

        let result = search_with_keywords(
            State(state.clone()),
            Query(KeywordParams {
                keyword: "  ".to_string(),
                min_experience: None,
            }),
        )
        .await;
        assert_eq!(result.unwrap_err().status(), StatusCode::BAD_REQUEST);

        let result = search_by_context(
            State(state),
            Query(ContextParams {
                prompt: String::new(),
            }),
        )
        .await;
        assert_eq!(result.unwrap_err().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_all_data() {
        let state = state_with(MockRecordStore::new(), MockSearchProvider::new());

        let (_, Json(body)) = delete_all_data(
            State(state.clone()),
            Query(DeleteParams { delete_index: true }),
        )
        .await
        .unwrap();
        assert_eq!(body["outcome"], json!("deleted"));

        let result = get_all_data(State(state)).await;
        assert_eq!(result.unwrap_err().status(), StatusCode::NOT_FOUND);
    }
}
