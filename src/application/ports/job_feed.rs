use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{JobId, TranslationJob, TranslationRequest};

/// Read side used by a client while it waits for a job.
#[async_trait]
pub trait JobFeed: Send + Sync {
    async fn fetch_job(&self, id: JobId) -> Result<TranslationJob, FeedError>;

    /// Resolves a time-limited download link for a completed job.
    async fn download_url(&self, job: &TranslationJob, ttl: Duration)
    -> Result<String, FeedError>;
}

/// Write side used by a client to start a job. Submitting uploads the source,
/// creates the `pending` record and triggers processing.
#[async_trait]
pub trait JobSubmitter: Send + Sync {
    async fn submit(&self, request: TranslationRequest) -> Result<TranslationJob, FeedError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("translation not found: {0}")]
    NotFound(JobId),
    #[error("request rejected: {0}")]
    Rejected(String),
    #[error("transient failure: {0}")]
    Transient(String),
}
