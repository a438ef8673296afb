use async_trait::async_trait;

use crate::domain::Language;

/// Performs the actual translation of extracted document text.
#[async_trait]
pub trait TranslationWorker: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        source_language: Language,
        target_language: Language,
    ) -> Result<String, TranslationError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranslationError {
    #[error("{0}")]
    Rejected(String),
    #[error("translation service request failed: {0}")]
    ApiRequestFailed(String),
    #[error("translation service rate limited")]
    RateLimited,
    #[error("invalid translation response: {0}")]
    InvalidResponse(String),
    #[error("translation timed out after {0}s")]
    TimedOut(u64),
}
