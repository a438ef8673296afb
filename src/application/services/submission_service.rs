use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::application::ports::{
    BlobStore, BlobStoreError, FeedError, JobRepository, JobSubmitter, RepositoryError,
};
use crate::domain::{JobId, StoragePath, TranslationJob, TranslationRequest};

/// Uploads validated requests and records them as `pending` jobs.
pub struct SubmissionService {
    job_repository: Arc<dyn JobRepository>,
    blob_store: Arc<dyn BlobStore>,
    dispatch: Option<mpsc::Sender<JobId>>,
}

impl SubmissionService {
    /// `dispatch` receives the id of every created job; pass `None` to leave
    /// jobs pending until the trigger endpoint is called.
    pub fn new(
        job_repository: Arc<dyn JobRepository>,
        blob_store: Arc<dyn BlobStore>,
        dispatch: Option<mpsc::Sender<JobId>>,
    ) -> Self {
        Self {
            job_repository,
            blob_store,
            dispatch,
        }
    }

    #[tracing::instrument(
        skip(self, request),
        fields(
            filename = %request.filename,
            source_language = %request.source_language,
            target_language = %request.target_language,
        )
    )]
    pub async fn submit(
        &self,
        request: TranslationRequest,
    ) -> Result<TranslationJob, SubmissionError> {
        let job_id = JobId::new();
        let source_file = StoragePath::source(&job_id, &request.filename, request.kind);

        let size = self
            .blob_store
            .upload(&source_file, request.data, request.kind.as_mime())
            .await
            .map_err(SubmissionError::Upload)?;
        tracing::debug!(bytes = size, path = %source_file, "Source file stored");

        let job = TranslationJob::new(
            job_id,
            request.source_language,
            request.target_language,
            source_file,
            request.filename,
        );

        if let Err(e) = self.job_repository.create(&job).await {
            if let Err(del_err) = self.blob_store.delete(&job.source_file).await {
                tracing::warn!(
                    error = %del_err,
                    path = %job.source_file,
                    "Failed to delete source file after job creation failed"
                );
            }
            return Err(SubmissionError::Repository(e));
        }

        if let Some(sender) = &self.dispatch {
            if let Err(e) = sender.send(job_id).await {
                tracing::error!(error = %e, "Dispatcher unavailable, job stays pending");
            }
        }

        tracing::info!(job_id = %job_id, "Translation job created");
        Ok(job)
    }
}

#[async_trait]
impl JobSubmitter for SubmissionService {
    async fn submit(&self, request: TranslationRequest) -> Result<TranslationJob, FeedError> {
        SubmissionService::submit(self, request)
            .await
            .map_err(|e| FeedError::Transient(e.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("upload failed: {0}")]
    Upload(BlobStoreError),
    #[error("repository: {0}")]
    Repository(RepositoryError),
}
