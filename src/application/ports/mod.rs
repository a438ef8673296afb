mod blob_store;
mod file_loader;
mod job_feed;
mod job_repository;
mod repository_error;
mod translation_worker;

pub use blob_store::{BlobStore, BlobStoreError};
pub use file_loader::{FileLoader, FileLoaderError};
pub use job_feed::{FeedError, JobFeed, JobSubmitter};
pub use job_repository::JobRepository;
pub use repository_error::RepositoryError;
pub use translation_worker::{TranslationError, TranslationWorker};
