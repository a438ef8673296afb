use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use lingua_relay::application::ports::JobRepository;
use lingua_relay::application::services::{JobController, TranslationDispatcher};
use lingua_relay::domain::JobStatus;
use lingua_relay::infrastructure::persistence::InMemoryJobRepository;
use lingua_relay::infrastructure::text_processing::CompositeFileLoader;

use crate::helpers::{FakeWorker, MemoryBlobStore, WorkerBehavior, pending_job};

#[tokio::test]
async fn given_queued_jobs_when_dispatcher_drains_then_every_job_reaches_terminal_state() {
    let repository = Arc::new(InMemoryJobRepository::new());
    let blobs = Arc::new(MemoryBlobStore::default());
    let worker = Arc::new(FakeWorker::new(WorkerBehavior::Uppercase));
    let controller = Arc::new(JobController::new(
        repository.clone(),
        blobs.clone(),
        Arc::new(CompositeFileLoader::with_defaults()),
        worker.clone(),
        Duration::from_secs(5),
    ));
    let (sender, receiver) = mpsc::channel(8);
    let dispatcher = tokio::spawn(TranslationDispatcher::new(receiver, controller, 2).run());

    let mut ids = Vec::new();
    for i in 0..4 {
        let job = pending_job(&format!("doc-{}.txt", i));
        if i != 3 {
            blobs.insert(&job.source_file, b"hello");
        }
        repository.create(&job).await.unwrap();
        sender.send(job.id).await.unwrap();
        ids.push(job.id);
    }
    drop(sender);
    dispatcher.await.unwrap();

    let mut statuses = Vec::new();
    for id in ids {
        statuses.push(repository.get_by_id(id).await.unwrap().unwrap().status);
    }
    assert_eq!(
        statuses,
        vec![
            JobStatus::Completed,
            JobStatus::Completed,
            JobStatus::Completed,
            JobStatus::Failed
        ]
    );
    assert_eq!(worker.calls(), 3);
}
