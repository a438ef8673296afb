use std::io;
use std::time::Duration;

use bytes::Bytes;

use crate::domain::StoragePath;

#[async_trait::async_trait]
pub trait BlobStore: Send + Sync {
    /// Writes `data` at `path`, replacing any previous object. Returns the
    /// number of bytes written.
    async fn upload(
        &self,
        path: &StoragePath,
        data: Bytes,
        content_type: &str,
    ) -> Result<u64, BlobStoreError>;

    async fn download(&self, path: &StoragePath) -> Result<Bytes, BlobStoreError>;

    async fn delete(&self, path: &StoragePath) -> Result<(), BlobStoreError>;

    /// Issues a URL granting read access to `path` for `ttl`.
    async fn signed_url(&self, path: &StoragePath, ttl: Duration)
    -> Result<String, BlobStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum BlobStoreError {
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("object not found: {0}")]
    NotFound(String),
    #[error("download failed: {0}")]
    DownloadFailed(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    #[error("signing failed: {0}")]
    SigningFailed(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
