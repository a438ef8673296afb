use axum::Json;
use axum::response::IntoResponse;

use super::translation_types::LanguageEntry;
use crate::domain::Language;

pub async fn languages_handler() -> impl IntoResponse {
    let languages: Vec<LanguageEntry> = Language::ALL
        .iter()
        .map(|language| LanguageEntry {
            code: language.code().to_string(),
            name: language.name().to_string(),
        })
        .collect();
    Json(languages)
}
