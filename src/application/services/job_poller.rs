//! Client-side view of a translation job.
//!
//! The poller validates a submission locally, hands it to a [`JobSubmitter`],
//! then samples the job through a [`JobFeed`] on a fixed interval until it
//! reaches a terminal status:
//!
//! ```text
//! Idle -> Submitting -> Polling -> Redirecting -> Resolved
//!                          \-> Errored
//! ```
//!
//! Every state change is published on a `watch` channel.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::application::ports::{FeedError, JobFeed, JobSubmitter};
use crate::domain::{InputError, JobId, JobStatus, TranslationJob, TranslationRequest};

pub const GENERIC_FAILURE_MESSAGE: &str = "Translation failed. Please try again.";
pub const SUBMIT_FAILURE_MESSAGE: &str = "Failed to submit translation request";
pub const DETAILS_FAILURE_MESSAGE: &str = "Failed to load translation details";
pub const NOT_FOUND_MESSAGE: &str = "Translation not found";
pub const TIMED_OUT_MESSAGE: &str = "Translation is taking too long. Please try again later.";
pub const CONNECTION_LOST_MESSAGE: &str = "Lost contact with the translation service";

/// Shortest accepted polling period; tokio intervals reject zero.
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollerState {
    Idle,
    Submitting,
    Polling {
        job_id: JobId,
    },
    /// The job completed; a download link is being resolved.
    Redirecting {
        job_id: JobId,
    },
    Resolved {
        job_id: JobId,
        download_url: String,
    },
    Errored {
        job_id: Option<JobId>,
        message: String,
    },
}

impl PollerState {
    pub fn is_final(&self) -> bool {
        matches!(self, PollerState::Resolved { .. } | PollerState::Errored { .. })
    }
}

#[derive(Debug, Clone)]
pub struct PollerConfig {
    pub interval: Duration,
    pub download_url_ttl: Duration,
    pub max_upload_bytes: u64,
    /// Give up after this many fetch errors in a row.
    pub max_transient_failures: Option<u32>,
    /// Give up once polling has run this long.
    pub deadline: Option<Duration>,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3),
            download_url_ttl: Duration::from_secs(60 * 60),
            max_upload_bytes: 10 * 1024 * 1024,
            max_transient_failures: Some(20),
            deadline: Some(Duration::from_secs(30 * 60)),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PollerError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),
    #[error("a translation is already in progress")]
    Busy,
    #[error("nothing to retry")]
    NothingToRetry,
    #[error("submission failed: {0}")]
    Submission(FeedError),
}

pub struct JobPoller {
    submitter: Arc<dyn JobSubmitter>,
    feed: Arc<dyn JobFeed>,
    config: PollerConfig,
    state: watch::Sender<PollerState>,
    last_request: Option<TranslationRequest>,
}

impl JobPoller {
    pub fn new(
        submitter: Arc<dyn JobSubmitter>,
        feed: Arc<dyn JobFeed>,
        mut config: PollerConfig,
    ) -> Self {
        config.interval = config.interval.max(MIN_POLL_INTERVAL);
        let (state, _) = watch::channel(PollerState::Idle);
        Self {
            submitter,
            feed,
            config,
            state,
            last_request: None,
        }
    }

    pub fn state(&self) -> PollerState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PollerState> {
        self.state.subscribe()
    }

    /// Validates the input and submits it. Invalid input is rejected before
    /// any network call and leaves the state untouched.
    pub async fn submit(
        &mut self,
        filename: &str,
        mime: Option<&str>,
        data: Bytes,
        source_language: &str,
        target_language: &str,
    ) -> Result<JobId, PollerError> {
        self.ensure_idle()?;
        let request = TranslationRequest::validate(
            filename,
            mime,
            data,
            source_language,
            target_language,
            self.config.max_upload_bytes,
        )?;
        self.send(request).await
    }

    /// Resubmits the last request as a new job. Failed jobs are never resumed.
    pub async fn retry(&mut self) -> Result<JobId, PollerError> {
        if !matches!(self.state(), PollerState::Errored { .. }) {
            return Err(PollerError::Busy);
        }
        let request = self.last_request.clone().ok_or(PollerError::NothingToRetry)?;
        self.send(request).await
    }

    /// Polls until the job resolves, errors, or `cancel` fires. Returns the
    /// state the poller was left in.
    pub async fn run(&self, cancel: CancellationToken) -> PollerState {
        let job_id = match self.state() {
            PollerState::Polling { job_id } => job_id,
            other => return other,
        };

        let mut ticker = tokio::time::interval(self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;

        let started = Instant::now();
        let mut consecutive_failures: u32 = 0;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!(job_id = %job_id, "Poller cancelled");
                    return self.state();
                }
                _ = ticker.tick() => {}
            }

            let fetched = tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!(job_id = %job_id, "Poller cancelled during fetch");
                    return self.state();
                }
                fetched = self.feed.fetch_job(job_id) => fetched,
            };

            match fetched {
                Ok(job) => {
                    consecutive_failures = 0;
                    match job.status {
                        JobStatus::Completed => return self.resolve(&job).await,
                        JobStatus::Failed => {
                            let message = job
                                .error_message
                                .filter(|m| !m.trim().is_empty())
                                .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
                            return self.set(PollerState::Errored {
                                job_id: Some(job_id),
                                message,
                            });
                        }
                        JobStatus::Pending | JobStatus::Processing => {
                            tracing::trace!(job_id = %job_id, status = %job.status, "Still waiting");
                        }
                    }
                }
                Err(FeedError::NotFound(_)) => {
                    return self.set(PollerState::Errored {
                        job_id: Some(job_id),
                        message: NOT_FOUND_MESSAGE.to_string(),
                    });
                }
                Err(e) => {
                    consecutive_failures += 1;
                    tracing::warn!(
                        job_id = %job_id,
                        error = %e,
                        consecutive_failures,
                        "Error checking translation status"
                    );
                    if self
                        .config
                        .max_transient_failures
                        .is_some_and(|max| consecutive_failures >= max)
                    {
                        return self.set(PollerState::Errored {
                            job_id: Some(job_id),
                            message: CONNECTION_LOST_MESSAGE.to_string(),
                        });
                    }
                }
            }

            if self
                .config
                .deadline
                .is_some_and(|deadline| started.elapsed() >= deadline)
            {
                return self.set(PollerState::Errored {
                    job_id: Some(job_id),
                    message: TIMED_OUT_MESSAGE.to_string(),
                });
            }
        }
    }

    fn ensure_idle(&self) -> Result<(), PollerError> {
        match self.state() {
            PollerState::Idle | PollerState::Errored { .. } | PollerState::Resolved { .. } => {
                Ok(())
            }
            _ => Err(PollerError::Busy),
        }
    }

    async fn send(&mut self, request: TranslationRequest) -> Result<JobId, PollerError> {
        self.last_request = Some(request.clone());
        self.set(PollerState::Submitting);

        match self.submitter.submit(request).await {
            Ok(job) => {
                tracing::info!(job_id = %job.id, "Translation submitted");
                self.set(PollerState::Polling { job_id: job.id });
                Ok(job.id)
            }
            Err(e) => {
                tracing::error!(error = %e, "Error submitting translation");
                self.set(PollerState::Errored {
                    job_id: None,
                    message: SUBMIT_FAILURE_MESSAGE.to_string(),
                });
                Err(PollerError::Submission(e))
            }
        }
    }

    async fn resolve(&self, job: &TranslationJob) -> PollerState {
        self.set(PollerState::Redirecting { job_id: job.id });

        match self
            .feed
            .download_url(job, self.config.download_url_ttl)
            .await
        {
            Ok(download_url) => self.set(PollerState::Resolved {
                job_id: job.id,
                download_url,
            }),
            Err(e) => {
                tracing::error!(job_id = %job.id, error = %e, "Error resolving download link");
                self.set(PollerState::Errored {
                    job_id: Some(job.id),
                    message: DETAILS_FAILURE_MESSAGE.to_string(),
                })
            }
        }
    }

    fn set(&self, next: PollerState) -> PollerState {
        self.state.send_replace(next.clone());
        next
    }
}
