use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, multipart};

use crate::application::ports::{FeedError, JobFeed, JobSubmitter};
use crate::domain::{JobId, TranslationJob, TranslationRequest};
use crate::presentation::handlers::translation_types::{
    DownloadResponse, ErrorResponse, TranslationResource,
};

/// Talks to a remote lingua-relay server, so a poller can run out of process.
pub struct HttpJobClient {
    client: Client,
    base_url: String,
}

impl HttpJobClient {
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| FeedError::Rejected(format!("http client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn translation_url(&self, id: JobId) -> String {
        format!("{}/api/v1/translations/{}", self.base_url, id)
    }
}

async fn error_message(response: reqwest::Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    serde_json::from_str::<ErrorResponse>(&body)
        .map(|e| e.error)
        .unwrap_or_else(|_| format!("HTTP {}: {}", status, body))
}

async fn parse_job(response: reqwest::Response) -> Result<TranslationJob, FeedError> {
    let resource: TranslationResource = response
        .json()
        .await
        .map_err(|e| FeedError::Transient(format!("malformed job response: {e}")))?;
    TranslationJob::try_from(resource).map_err(FeedError::Transient)
}

#[async_trait]
impl JobFeed for HttpJobClient {
    async fn fetch_job(&self, id: JobId) -> Result<TranslationJob, FeedError> {
        let response = self
            .client
            .get(self.translation_url(id))
            .send()
            .await
            .map_err(|e| FeedError::Transient(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(FeedError::NotFound(id)),
            s if s.is_success() => parse_job(response).await,
            _ => Err(FeedError::Transient(error_message(response).await)),
        }
    }

    async fn download_url(
        &self,
        job: &TranslationJob,
        ttl: Duration,
    ) -> Result<String, FeedError> {
        let response = self
            .client
            .get(format!("{}/download", self.translation_url(job.id)))
            .query(&[("ttl_secs", ttl.as_secs())])
            .send()
            .await
            .map_err(|e| FeedError::Transient(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(FeedError::NotFound(job.id)),
            s if s.is_client_error() => Err(FeedError::Rejected(error_message(response).await)),
            s if s.is_success() => response
                .json::<DownloadResponse>()
                .await
                .map(|d| d.download_url)
                .map_err(|e| FeedError::Transient(format!("malformed download response: {e}"))),
            _ => Err(FeedError::Transient(error_message(response).await)),
        }
    }
}

#[async_trait]
impl JobSubmitter for HttpJobClient {
    async fn submit(&self, request: TranslationRequest) -> Result<TranslationJob, FeedError> {
        let file_part = multipart::Part::bytes(request.data.to_vec())
            .file_name(request.filename.clone())
            .mime_str(request.kind.as_mime())
            .map_err(|e| FeedError::Rejected(format!("mime: {e}")))?;

        let form = multipart::Form::new()
            .text("source_language", request.source_language.code())
            .text("target_language", request.target_language.code())
            .part("file", file_part);

        let response = self
            .client
            .post(format!("{}/api/v1/translations", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| FeedError::Transient(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            parse_job(response).await
        } else if status.is_client_error() {
            Err(FeedError::Rejected(error_message(response).await))
        } else {
            Err(FeedError::Transient(error_message(response).await))
        }
    }
}
