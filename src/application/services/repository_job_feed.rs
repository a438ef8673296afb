use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{BlobStore, FeedError, JobFeed, JobRepository};
use crate::domain::{JobId, TranslationJob};

/// In-process feed reading straight from the job and blob stores.
pub struct RepositoryJobFeed {
    job_repository: Arc<dyn JobRepository>,
    blob_store: Arc<dyn BlobStore>,
}

impl RepositoryJobFeed {
    pub fn new(job_repository: Arc<dyn JobRepository>, blob_store: Arc<dyn BlobStore>) -> Self {
        Self {
            job_repository,
            blob_store,
        }
    }
}

#[async_trait]
impl JobFeed for RepositoryJobFeed {
    async fn fetch_job(&self, id: JobId) -> Result<TranslationJob, FeedError> {
        self.job_repository
            .get_by_id(id)
            .await
            .map_err(|e| FeedError::Transient(e.to_string()))?
            .ok_or(FeedError::NotFound(id))
    }

    async fn download_url(
        &self,
        job: &TranslationJob,
        ttl: Duration,
    ) -> Result<String, FeedError> {
        let path = job
            .translated_file
            .as_ref()
            .ok_or_else(|| FeedError::Rejected(format!("job {} has no translated file", job.id)))?;

        self.blob_store
            .signed_url(path, ttl)
            .await
            .map_err(|e| FeedError::Transient(e.to_string()))
    }
}
