use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use futures::FutureExt;

use crate::application::ports::{
    BlobStore, BlobStoreError, FileLoader, FileLoaderError, JobRepository, RepositoryError,
    TranslationError, TranslationWorker,
};
use crate::domain::{FileKind, JobId, JobStatus, JobUpdate, StoragePath, TranslationJob};

/// Result of a single `process` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    Completed { translated_file: StoragePath },
    Failed { error_message: String },
    /// The job was already `completed` or `failed`; nothing was written.
    AlreadyTerminal(JobStatus),
    /// Another invocation holds the job in `processing`.
    AlreadyClaimed,
}

/// Drives a job from `pending` to a terminal state.
pub struct JobController {
    job_repository: Arc<dyn JobRepository>,
    blob_store: Arc<dyn BlobStore>,
    file_loader: Arc<dyn FileLoader>,
    worker: Arc<dyn TranslationWorker>,
    worker_timeout: Duration,
}

impl JobController {
    pub fn new(
        job_repository: Arc<dyn JobRepository>,
        blob_store: Arc<dyn BlobStore>,
        file_loader: Arc<dyn FileLoader>,
        worker: Arc<dyn TranslationWorker>,
        worker_timeout: Duration,
    ) -> Self {
        Self {
            job_repository,
            blob_store,
            file_loader,
            worker,
            worker_timeout,
        }
    }

    #[tracing::instrument(skip(self), fields(job_id = %job_id))]
    pub async fn process(&self, job_id: JobId) -> Result<ProcessOutcome, ControllerError> {
        let job = self
            .job_repository
            .get_by_id(job_id)
            .await?
            .ok_or(ControllerError::NotFound(job_id))?;

        if job.status.is_terminal() {
            tracing::info!(status = %job.status, "Job already finished, ignoring trigger");
            return Ok(ProcessOutcome::AlreadyTerminal(job.status));
        }

        if !self.job_repository.claim(job_id).await? {
            tracing::warn!(status = %job.status, "Job is owned by another invocation");
            return Ok(ProcessOutcome::AlreadyClaimed);
        }
        tracing::debug!(status = %JobStatus::Processing, "Job status transition");

        // From here on the job sits in `processing` and every exit must resolve it.
        let result = match AssertUnwindSafe(self.run_pipeline(&job))
            .catch_unwind()
            .await
        {
            Ok(result) => result,
            Err(panic) => Err(JobFailure::Panicked(panic_message(panic.as_ref()))),
        };

        match result {
            Ok(translated_file) => {
                let update = JobUpdate::Completed {
                    translated_file: translated_file.clone(),
                };
                if let Err(e) = self.job_repository.update(job_id, update).await {
                    tracing::error!(error = %e, "Failed to record completed translation");
                    self.record_failure(job_id, "Failed to record translation result")
                        .await;
                    return Err(ControllerError::Repository(e));
                }
                tracing::info!(path = %translated_file, "Translation completed");
                Ok(ProcessOutcome::Completed { translated_file })
            }
            Err(failure) => {
                let error_message = failure.to_string();
                tracing::warn!(error = %error_message, "Translation failed");
                self.job_repository
                    .update(
                        job_id,
                        JobUpdate::Failed {
                            error_message: error_message.clone(),
                        },
                    )
                    .await
                    .inspect_err(|e| tracing::error!(error = %e, "Failed to record job failure"))?;
                Ok(ProcessOutcome::Failed { error_message })
            }
        }
    }

    /// Marks jobs left in `processing` by a previous run as failed.
    ///
    /// Only sound for a single-instance deployment.
    pub async fn recover_interrupted(&self) -> Result<usize, ControllerError> {
        let stuck = self
            .job_repository
            .list_by_status(JobStatus::Processing)
            .await?;
        let count = stuck.len();

        for job in stuck {
            tracing::warn!(job_id = %job.id, "Failing job interrupted by restart");
            self.job_repository
                .update(
                    job.id,
                    JobUpdate::Failed {
                        error_message: "Translation interrupted by a service restart".to_string(),
                    },
                )
                .await?;
        }

        Ok(count)
    }

    async fn run_pipeline(&self, job: &TranslationJob) -> Result<StoragePath, JobFailure> {
        let data = self
            .blob_store
            .download(&job.source_file)
            .await
            .map_err(JobFailure::SourceUnavailable)?;

        // Paths written before the extension was enforced may carry none.
        let kind = job.source_file.file_kind().unwrap_or(FileKind::Text);
        let text = self
            .file_loader
            .extract_text(&data, kind)
            .await
            .map_err(JobFailure::Extraction)?;

        tracing::debug!(
            chars = text.chars().count(),
            source_language = %job.source_language,
            target_language = %job.target_language,
            "Invoking translation worker"
        );

        let translated = tokio::time::timeout(
            self.worker_timeout,
            self.worker
                .translate(&text, job.source_language, job.target_language),
        )
        .await
        .map_err(|_| JobFailure::Worker(TranslationError::TimedOut(self.worker_timeout.as_secs())))?
        .map_err(JobFailure::Worker)?;

        if translated.trim().is_empty() {
            return Err(JobFailure::EmptyTranslation);
        }

        let path = StoragePath::translated(&job.id);
        self.blob_store
            .upload(&path, Bytes::from(translated), "text/plain")
            .await
            .map_err(JobFailure::Upload)?;

        Ok(path)
    }

    async fn record_failure(&self, job_id: JobId, message: &str) {
        let update = JobUpdate::Failed {
            error_message: message.to_string(),
        };
        if let Err(e) = self.job_repository.update(job_id, update).await {
            tracing::error!(error = %e, "Job left in processing, failure could not be recorded");
        }
    }
}

/// Reasons a claimed job ends in `failed`. The display text is what gets
/// stored as the job's error message.
#[derive(Debug, thiserror::Error)]
pub enum JobFailure {
    #[error("Failed to download source file")]
    SourceUnavailable(#[source] BlobStoreError),
    #[error("Failed to read source file: {0}")]
    Extraction(FileLoaderError),
    #[error("{0}")]
    Worker(TranslationError),
    #[error("Translation service returned an empty result")]
    EmptyTranslation,
    #[error("Failed to upload translated file: {0}")]
    Upload(BlobStoreError),
    #[error("Translation worker crashed: {0}")]
    Panicked(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error("translation not found: {0}")]
    NotFound(JobId),
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
