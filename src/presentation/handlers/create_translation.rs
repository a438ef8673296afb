use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;

use super::translation_types::{ErrorResponse, TranslationResource};
use crate::domain::{InputError, TranslationRequest};
use crate::presentation::state::AppState;

#[derive(Default)]
struct UploadForm {
    filename: Option<String>,
    mime: Option<String>,
    data: Bytes,
    source_language: String,
    target_language: String,
}

fn error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse::new(message))).into_response()
}

async fn read_form(multipart: &mut Multipart) -> Result<UploadForm, Response> {
    let mut form = UploadForm::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return Err(error(
                    e.status(),
                    format!("Failed to read multipart: {}", e.body_text()),
                ));
            }
        };

        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                form.filename = Some(field.file_name().unwrap_or("upload").to_string());
                form.mime = field.content_type().map(str::to_string);
                form.data = field.bytes().await.map_err(|e| {
                    tracing::error!(error = %e, "Failed to read file bytes");
                    error(e.status(), format!("Failed to read file: {}", e.body_text()))
                })?;
            }
            "source_language" | "target_language" => {
                let value = field.text().await.map_err(|e| {
                    error(StatusCode::BAD_REQUEST, format!("Invalid {}: {}", name, e))
                })?;
                if name == "source_language" {
                    form.source_language = value;
                } else {
                    form.target_language = value;
                }
            }
            other => tracing::debug!(field = %other, "Ignoring unknown multipart field"),
        }
    }

    Ok(form)
}

fn input_error_status(error: &InputError) -> StatusCode {
    match error {
        InputError::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        InputError::UnsupportedFileType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        InputError::EmptyFile
        | InputError::UnsupportedLanguage(_)
        | InputError::SameLanguage(_) => StatusCode::BAD_REQUEST,
    }
}

#[tracing::instrument(skip(state, multipart))]
pub async fn create_translation_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Response {
    let form = match read_form(&mut multipart).await {
        Ok(form) => form,
        Err(response) => return response,
    };

    let Some(filename) = form.filename else {
        tracing::warn!("Translation request with no file");
        return error(StatusCode::BAD_REQUEST, InputError::EmptyFile.to_string());
    };

    tracing::debug!(
        filename = %filename,
        content_type = ?form.mime,
        bytes = form.data.len(),
        "Processing file upload"
    );

    let request = match TranslationRequest::validate(
        &filename,
        form.mime.as_deref(),
        form.data,
        &form.source_language,
        &form.target_language,
        state.settings.uploads.max_file_size_bytes(),
    ) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected translation request");
            return error(input_error_status(&e), e.to_string());
        }
    };

    match state.submission_service.submit(request).await {
        Ok(job) => (StatusCode::ACCEPTED, Json(TranslationResource::from(&job))).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to create translation");
            error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to submit translation request",
            )
        }
    }
}
