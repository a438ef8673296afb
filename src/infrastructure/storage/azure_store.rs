use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use http::Method;
use object_store::azure::{MicrosoftAzure, MicrosoftAzureBuilder};
use object_store::path::Path as StorePath;
use object_store::signer::Signer;
use object_store::{Attribute, Attributes, ObjectStore, PutOptions, PutPayload};

use crate::application::ports::{BlobStore, BlobStoreError};
use crate::domain::StoragePath;

/// Blob store backed by an Azure storage container. Download links are SAS
/// URLs issued by the container itself.
pub struct AzureBlobStore {
    inner: Arc<MicrosoftAzure>,
}

impl AzureBlobStore {
    pub fn new(account: &str, access_key: &str, container: &str) -> Result<Self, BlobStoreError> {
        let store = MicrosoftAzureBuilder::new()
            .with_account(account)
            .with_access_key(access_key)
            .with_container_name(container)
            .build()
            .map_err(|e| BlobStoreError::UploadFailed(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(store),
        })
    }
}

#[async_trait::async_trait]
impl BlobStore for AzureBlobStore {
    async fn upload(
        &self,
        path: &StoragePath,
        data: Bytes,
        content_type: &str,
    ) -> Result<u64, BlobStoreError> {
        let store_path = StorePath::from(path.as_str());
        let size = data.len() as u64;

        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.to_string().into());
        let options = PutOptions {
            attributes,
            ..Default::default()
        };

        self.inner
            .put_opts(&store_path, PutPayload::from(data), options)
            .await
            .map_err(|e| BlobStoreError::UploadFailed(e.to_string()))?;
        Ok(size)
    }

    async fn download(&self, path: &StoragePath) -> Result<Bytes, BlobStoreError> {
        let store_path = StorePath::from(path.as_str());
        let result = self.inner.get(&store_path).await.map_err(|e| match e {
            object_store::Error::NotFound { .. } => BlobStoreError::NotFound(path.to_string()),
            other => BlobStoreError::DownloadFailed(other.to_string()),
        })?;

        result
            .bytes()
            .await
            .map_err(|e| BlobStoreError::DownloadFailed(e.to_string()))
    }

    async fn delete(&self, path: &StoragePath) -> Result<(), BlobStoreError> {
        let store_path = StorePath::from(path.as_str());
        self.inner
            .delete(&store_path)
            .await
            .map_err(|e| BlobStoreError::DeleteFailed(e.to_string()))
    }

    async fn signed_url(
        &self,
        path: &StoragePath,
        ttl: Duration,
    ) -> Result<String, BlobStoreError> {
        let store_path = StorePath::from(path.as_str());
        let url = self
            .inner
            .signed_url(Method::GET, &store_path, ttl)
            .await
            .map_err(|e| BlobStoreError::SigningFailed(e.to_string()))?;
        Ok(url.to_string())
    }
}
