use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;
use tracing::Instrument;

use crate::domain::JobId;

use super::{JobController, ProcessOutcome};

/// Consumes job ids from the submission channel and runs them through the
/// controller, at most `max_concurrent` at a time.
pub struct TranslationDispatcher {
    receiver: mpsc::Receiver<JobId>,
    controller: Arc<JobController>,
    permits: Arc<Semaphore>,
}

impl TranslationDispatcher {
    pub fn new(
        receiver: mpsc::Receiver<JobId>,
        controller: Arc<JobController>,
        max_concurrent: usize,
    ) -> Self {
        Self {
            receiver,
            controller,
            permits: Arc::new(Semaphore::new(max_concurrent.max(1))),
        }
    }

    pub async fn run(mut self) {
        tracing::info!("Translation dispatcher started");
        let mut in_flight = JoinSet::new();

        while let Some(job_id) = self.receiver.recv().await {
            let Ok(permit) = Arc::clone(&self.permits).acquire_owned().await else {
                break;
            };
            let controller = Arc::clone(&self.controller);
            let span = tracing::info_span!("translation_job", job_id = %job_id);

            in_flight.spawn(
                async move {
                    match controller.process(job_id).await {
                        Ok(ProcessOutcome::Failed { error_message }) => {
                            tracing::warn!(error = %error_message, "Translation job failed");
                        }
                        Ok(outcome) => tracing::debug!(?outcome, "Translation job finished"),
                        Err(e) => tracing::error!(error = %e, "Translation job aborted"),
                    }
                    drop(permit);
                }
                .instrument(span),
            );

            while in_flight.try_join_next().is_some() {}
        }

        while in_flight.join_next().await.is_some() {}
        tracing::info!("Translation dispatcher stopped: channel closed");
    }
}
