use lingua_relay::domain::{JobStatus, JobUpdate, StoragePath, TransitionError};

use crate::helpers::pending_job;

#[test]
fn given_new_job_when_created_then_is_pending_without_outputs() {
    let job = pending_job("doc.txt");

    assert_eq!(job.status, JobStatus::Pending);
    assert!(job.translated_file.is_none());
    assert!(job.error_message.is_none());
    assert!(job.is_consistent());
}

#[test]
fn given_processing_job_when_completed_then_records_translated_file() {
    let mut job = pending_job("doc.txt");
    job.apply(JobUpdate::Processing).unwrap();

    let path = StoragePath::translated(&job.id);
    job.apply(JobUpdate::Completed {
        translated_file: path.clone(),
    })
    .unwrap();

    assert_eq!(job.status, JobStatus::Completed);
    assert_eq!(job.translated_file, Some(path));
    assert!(job.is_consistent());
    assert!(job.updated_at >= job.created_at);
}

#[test]
fn given_processing_job_when_failed_then_records_message_without_file() {
    let mut job = pending_job("doc.txt");
    job.apply(JobUpdate::Processing).unwrap();

    job.apply(JobUpdate::Failed {
        error_message: "Unsupported document format".to_string(),
    })
    .unwrap();

    assert_eq!(job.status, JobStatus::Failed);
    assert_eq!(
        job.error_message.as_deref(),
        Some("Unsupported document format")
    );
    assert!(job.translated_file.is_none());
    assert!(job.is_consistent());
}

#[test]
fn given_pending_job_when_completing_directly_then_rejects_transition() {
    let mut job = pending_job("doc.txt");
    let path = StoragePath::translated(&job.id);

    let result = job.apply(JobUpdate::Completed {
        translated_file: path,
    });

    assert_eq!(
        result.unwrap_err(),
        TransitionError {
            from: JobStatus::Pending,
            to: JobStatus::Completed
        }
    );
    assert_eq!(job.status, JobStatus::Pending);
    assert!(job.translated_file.is_none());
}

#[test]
fn given_failed_job_when_applying_any_update_then_job_is_unchanged() {
    let mut job = pending_job("doc.txt");
    job.apply(JobUpdate::Processing).unwrap();
    job.apply(JobUpdate::Failed {
        error_message: "boom".to_string(),
    })
    .unwrap();
    let before = job.clone();

    assert!(job.apply(JobUpdate::Processing).is_err());
    assert!(
        job.apply(JobUpdate::Failed {
            error_message: "again".to_string()
        })
        .is_err()
    );
    assert_eq!(job, before);
}

#[test]
fn given_update_when_asking_required_status_then_matches_lifecycle() {
    assert_eq!(JobUpdate::Processing.required_status(), JobStatus::Pending);
    assert_eq!(
        JobUpdate::Failed {
            error_message: String::new()
        }
        .required_status(),
        JobStatus::Processing
    );
}
