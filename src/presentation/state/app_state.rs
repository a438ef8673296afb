use std::sync::Arc;

use crate::application::ports::{BlobStore, JobRepository};
use crate::application::services::{JobController, SubmissionService};
use crate::infrastructure::storage::UrlSigner;
use crate::presentation::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub job_repository: Arc<dyn JobRepository>,
    pub blob_store: Arc<dyn BlobStore>,
    pub submission_service: Arc<SubmissionService>,
    pub job_controller: Arc<JobController>,
    pub url_signer: Arc<UrlSigner>,
    pub settings: Arc<Settings>,
}
