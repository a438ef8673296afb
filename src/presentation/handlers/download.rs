use std::time::Duration;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::translation_status::load_job;
use super::translation_types::{DownloadQuery, DownloadResponse, ErrorResponse};
use crate::domain::JobStatus;
use crate::presentation::state::AppState;

#[tracing::instrument(skip(state))]
pub async fn download_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<DownloadQuery>,
) -> Response {
    let job = match load_job(&state, &id).await {
        Ok(job) => job,
        Err(response) => return response,
    };

    let translated_file = match (job.status, job.translated_file) {
        (JobStatus::Completed, Some(path)) => path,
        (status, _) => {
            return (
                StatusCode::CONFLICT,
                Json(ErrorResponse::new(format!(
                    "Translation is {}, nothing to download yet",
                    status
                ))),
            )
                .into_response();
        }
    };

    let poller = &state.settings.poller;
    let ttl_secs = query
        .ttl_secs
        .unwrap_or(poller.download_url_ttl_secs)
        .clamp(1, poller.max_download_url_ttl_secs.max(1));

    match state
        .blob_store
        .signed_url(&translated_file, Duration::from_secs(ttl_secs))
        .await
    {
        Ok(download_url) => (
            StatusCode::OK,
            Json(DownloadResponse {
                download_url,
                expires_in: ttl_secs,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, path = %translated_file, "Failed to sign download URL");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to load translation details")),
            )
                .into_response()
        }
    }
}
