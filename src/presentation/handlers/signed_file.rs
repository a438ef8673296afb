use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use super::translation_types::ErrorResponse;
use crate::application::ports::BlobStoreError;
use crate::domain::{FileKind, StoragePath};
use crate::presentation::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SignedFileQuery {
    pub expires: i64,
    pub signature: String,
}

/// Serves blobs behind links issued by the local store's signer.
#[tracing::instrument(skip(state, query))]
pub async fn signed_file_handler(
    State(state): State<AppState>,
    Path(path): Path<String>,
    Query(query): Query<SignedFileQuery>,
) -> Response {
    let path = StoragePath::from_raw(path);

    if let Err(e) = state
        .url_signer
        .verify(&path, query.expires, &query.signature)
    {
        tracing::warn!(error = %e, path = %path, "Rejected signed file request");
        return (
            StatusCode::FORBIDDEN,
            Json(ErrorResponse::new(format!("Download link rejected: {}", e))),
        )
            .into_response();
    }

    match state.blob_store.download(&path).await {
        Ok(data) => {
            let content_type = FileKind::from_filename(path.file_name())
                .map(|kind| kind.as_mime())
                .unwrap_or("application/octet-stream");
            let disposition = format!("attachment; filename=\"{}\"", path.file_name());
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, content_type.to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                data,
            )
                .into_response()
        }
        Err(BlobStoreError::NotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("File not found")),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, path = %path, "Failed to read signed file");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to read file")),
            )
                .into_response()
        }
    }
}
