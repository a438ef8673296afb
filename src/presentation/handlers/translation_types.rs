//! JSON bodies exchanged over the translation API. Shared by the handlers
//! and the HTTP client so both sides agree on the wire format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{JobId, Language, StoragePath, TranslationJob};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationResource {
    pub id: Uuid,
    pub status: String,
    pub source_language: Language,
    pub target_language: Language,
    pub original_filename: String,
    pub source_file_path: String,
    pub translated_file_path: Option<String>,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&TranslationJob> for TranslationResource {
    fn from(job: &TranslationJob) -> Self {
        Self {
            id: job.id.as_uuid(),
            status: job.status.as_str().to_string(),
            source_language: job.source_language,
            target_language: job.target_language,
            original_filename: job.original_filename.clone(),
            source_file_path: job.source_file.as_str().to_string(),
            translated_file_path: job
                .translated_file
                .as_ref()
                .map(|p| p.as_str().to_string()),
            error_message: job.error_message.clone(),
            created_at: job.created_at,
            updated_at: job.updated_at,
        }
    }
}

impl TryFrom<TranslationResource> for TranslationJob {
    type Error = String;

    fn try_from(resource: TranslationResource) -> Result<Self, Self::Error> {
        Ok(TranslationJob {
            id: JobId::from_uuid(resource.id),
            source_language: resource.source_language,
            target_language: resource.target_language,
            source_file: StoragePath::from_raw(resource.source_file_path),
            original_filename: resource.original_filename,
            translated_file: resource.translated_file_path.map(StoragePath::from_raw),
            status: resource.status.parse()?,
            error_message: resource.error_message,
            created_at: resource.created_at,
            updated_at: resource.updated_at,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TriggerResponse {
    pub success: bool,
    pub translation_id: Uuid,
    pub status: String,
    pub translated_file_path: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DownloadResponse {
    pub download_url: String,
    pub expires_in: u64,
}

#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    pub ttl_secs: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LanguageEntry {
    pub code: String,
    pub name: String,
}
