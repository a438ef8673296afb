use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::translation_types::{ErrorResponse, TranslationResource};
use crate::domain::{JobId, TranslationJob};
use crate::presentation::state::AppState;

/// Parses the id path segment and loads the job, producing the error response
/// the translation endpoints share when either step fails.
pub(super) async fn load_job(state: &AppState, raw_id: &str) -> Result<TranslationJob, Response> {
    let job_id: JobId = raw_id.parse().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(format!(
                "Invalid translation ID: {}",
                raw_id
            ))),
        )
            .into_response()
    })?;

    match state.job_repository.get_by_id(job_id).await {
        Ok(Some(job)) => Ok(job),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Translation not found")),
        )
            .into_response()),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch translation");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to load translation details")),
            )
                .into_response())
        }
    }
}

#[tracing::instrument(skip(state))]
pub async fn translation_status_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    match load_job(&state, &id).await {
        Ok(job) => (StatusCode::OK, Json(TranslationResource::from(&job))).into_response(),
        Err(response) => response,
    }
}
