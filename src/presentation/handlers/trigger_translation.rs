use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::translation_types::{ErrorResponse, TriggerResponse};
use crate::application::services::{ControllerError, ProcessOutcome};
use crate::domain::{JobId, JobStatus};
use crate::presentation::state::AppState;

/// Runs the translation for a job synchronously and reports the outcome.
#[tracing::instrument(skip(state))]
pub async fn trigger_translation_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let Ok(job_id) = id.parse::<JobId>() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(format!("Invalid translation ID: {}", id))),
        )
            .into_response();
    };

    match state.job_controller.process(job_id).await {
        Ok(ProcessOutcome::Completed { translated_file }) => (
            StatusCode::OK,
            Json(TriggerResponse {
                success: true,
                translation_id: job_id.as_uuid(),
                status: JobStatus::Completed.as_str().to_string(),
                translated_file_path: Some(translated_file.as_str().to_string()),
            }),
        )
            .into_response(),
        Ok(ProcessOutcome::Failed { error_message }) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(error_message)),
        )
            .into_response(),
        Ok(ProcessOutcome::AlreadyTerminal(status)) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::new(format!("Translation already {}", status))),
        )
            .into_response(),
        Ok(ProcessOutcome::AlreadyClaimed) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::new("Translation is already being processed")),
        )
            .into_response(),
        Err(ControllerError::NotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Translation not found")),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Translation trigger failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Translation failed. Please try again.")),
            )
                .into_response()
        }
    }
}
