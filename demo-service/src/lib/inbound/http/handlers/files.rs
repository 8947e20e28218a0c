use std::sync::Arc;

use axum::extract::Multipart;
use axum::extract::Path;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use super::ApiError;
use crate::domain::files::service::FileService;
use crate::inbound::http::router::AppState;

pub async fn upload_file(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    store_multipart(&state.file_service, multipart).await
}

pub async fn download_file(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    serve_file(&state.file_service, &filename).await
}

pub async fn upload_file_s3(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    store_multipart(s3_service(&state)?, multipart).await
}

pub async fn download_file_s3(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    serve_file(s3_service(&state)?, &filename).await
}

pub async fn list_files_s3(
    State(state): State<AppState>,
) -> Result<Json<ListFilesResponse>, ApiError> {
    let files = s3_service(&state)?.list().await.map_err(ApiError::from)?;

    Ok(Json(ListFilesResponse { files }))
}

fn s3_service(state: &AppState) -> Result<&Arc<FileService>, ApiError> {
    state.s3_file_service.as_ref().ok_or_else(|| {
        ApiError::ServiceUnavailable("S3 storage is not configured".to_string())
    })
}

async fn store_multipart(
    service: &FileService,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .ok_or_else(|| ApiError::BadRequest("Missing filename".to_string()))?
            .to_string();

        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {}", e)))?;

        let location = service
            .upload(&filename, &bytes)
            .await
            .map_err(ApiError::from)?;

        return Ok(Json(UploadResponse { filename, location }));
    }

    Err(ApiError::BadRequest("Missing 'file' field".to_string()))
}

async fn serve_file(service: &FileService, filename: &str) -> Result<Response, ApiError> {
    let bytes = service.download(filename).await.map_err(ApiError::from)?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", filename),
            ),
        ],
        bytes,
    )
        .into_response())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadResponse {
    pub filename: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListFilesResponse {
    pub files: Vec<String>,
}
