use crate::domain::{JobId, JobStatus, JobUpdate, TranslationJob};
use async_trait::async_trait;

use super::RepositoryError;

#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn create(&self, job: &TranslationJob) -> Result<(), RepositoryError>;

    async fn get_by_id(&self, id: JobId) -> Result<Option<TranslationJob>, RepositoryError>;

    /// Applies `update` if the stored status allows it. Illegal transitions
    /// fail with `ConstraintViolation` and leave the record untouched.
    async fn update(&self, id: JobId, update: JobUpdate) -> Result<(), RepositoryError>;

    /// Atomically moves a job from `pending` to `processing`.
    ///
    /// Returns `false` when the job exists but is not `pending`, so at most one
    /// caller wins the claim for a given job.
    async fn claim(&self, id: JobId) -> Result<bool, RepositoryError>;

    async fn list_by_status(&self, status: JobStatus)
    -> Result<Vec<TranslationJob>, RepositoryError>;
}
