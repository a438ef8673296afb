use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::infrastructure::storage::SIGNED_FILES_ROUTE;
use crate::presentation::handlers::{
    create_translation_handler, download_handler, health_handler, languages_handler,
    signed_file_handler, translation_status_handler, trigger_translation_handler,
};
use crate::presentation::state::AppState;

/// Room for the multipart boundaries and the two language fields.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let body_limit =
        state.settings.uploads.max_file_size_bytes() as usize + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/v1/languages", get(languages_handler))
        .route("/api/v1/translations", post(create_translation_handler))
        .route("/api/v1/translations/{id}", get(translation_status_handler))
        .route(
            "/api/v1/translations/{id}/translate",
            post(trigger_translation_handler),
        )
        .route(
            "/api/v1/translations/{id}/download",
            get(download_handler),
        )
        .route(
            &format!("{}/{{*path}}", SIGNED_FILES_ROUTE),
            get(signed_file_handler),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
