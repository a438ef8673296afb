use lingua_relay::application::ports::{JobRepository, RepositoryError};
use lingua_relay::domain::{JobId, JobStatus, JobUpdate, StoragePath};

use crate::helpers::{TestPostgres, pending_job};

#[tokio::test]
async fn given_new_job_when_creating_and_retrieving_then_job_is_persisted() {
    let test_pg = TestPostgres::new().await;
    let job = pending_job("report.pdf");

    test_pg
        .job_repository
        .create(&job)
        .await
        .expect("Failed to create job");

    let retrieved = test_pg
        .job_repository
        .get_by_id(job.id)
        .await
        .expect("Failed to retrieve job")
        .expect("Job not found");

    assert_eq!(retrieved.id, job.id);
    assert_eq!(retrieved.status, JobStatus::Pending);
    assert_eq!(retrieved.source_file, job.source_file);
    assert_eq!(retrieved.original_filename, "report.pdf");
    assert_eq!(retrieved.source_language, job.source_language);
    assert!(retrieved.translated_file.is_none());
}

#[tokio::test]
async fn given_claimed_job_when_completing_then_translated_file_is_stored() {
    let test_pg = TestPostgres::new().await;
    let job = pending_job("report.pdf");
    test_pg.job_repository.create(&job).await.unwrap();

    assert!(test_pg.job_repository.claim(job.id).await.unwrap());
    assert!(!test_pg.job_repository.claim(job.id).await.unwrap());

    let translated = StoragePath::translated(&job.id);
    test_pg
        .job_repository
        .update(
            job.id,
            JobUpdate::Completed {
                translated_file: translated.clone(),
            },
        )
        .await
        .expect("Failed to complete job");

    let retrieved = test_pg
        .job_repository
        .get_by_id(job.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(retrieved.status, JobStatus::Completed);
    assert_eq!(retrieved.translated_file, Some(translated));
    assert!(retrieved.is_consistent());
}

#[tokio::test]
async fn given_pending_job_when_failing_without_claim_then_update_is_rejected() {
    let test_pg = TestPostgres::new().await;
    let job = pending_job("report.pdf");
    test_pg.job_repository.create(&job).await.unwrap();

    let result = test_pg
        .job_repository
        .update(
            job.id,
            JobUpdate::Failed {
                error_message: "boom".to_string(),
            },
        )
        .await;

    assert!(matches!(result, Err(RepositoryError::ConstraintViolation(_))));
}

#[tokio::test]
async fn given_jobs_in_several_states_when_listing_processing_then_returns_only_those() {
    let test_pg = TestPostgres::new().await;
    let waiting = pending_job("a.txt");
    let running = pending_job("b.txt");
    test_pg.job_repository.create(&waiting).await.unwrap();
    test_pg.job_repository.create(&running).await.unwrap();
    test_pg.job_repository.claim(running.id).await.unwrap();

    let processing = test_pg
        .job_repository
        .list_by_status(JobStatus::Processing)
        .await
        .unwrap();

    assert_eq!(processing.len(), 1);
    assert_eq!(processing[0].id, running.id);
}

#[tokio::test]
async fn given_completed_row_without_translated_file_when_inserting_directly_then_check_rejects_it() {
    let test_pg = TestPostgres::new().await;

    let result = sqlx::query(
        "INSERT INTO translations (id, source_language, target_language, source_file_path, \
         original_filename, status, created_at, updated_at) \
         VALUES (gen_random_uuid(), 'en', 'es', 'x/y.txt', 'y.txt', 'completed', now(), now())",
    )
    .execute(&test_pg.pool)
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn given_legacy_error_row_when_reading_then_it_is_a_failed_job() {
    let test_pg = TestPostgres::new().await;
    let id = uuid::Uuid::new_v4();
    sqlx::query(
        "INSERT INTO translations (id, source_language, target_language, source_file_path, \
         original_filename, status, error_message, created_at, updated_at) \
         VALUES ($1, 'en', 'es', 'x/y.txt', 'y.txt', 'error', 'Worker crashed', now(), now())",
    )
    .bind(id)
    .execute(&test_pg.pool)
    .await
    .expect("Legacy row should satisfy the table constraints");

    let job = test_pg
        .job_repository
        .get_by_id(JobId::from_uuid(id))
        .await
        .unwrap()
        .expect("Job not found");
    let failed = test_pg
        .job_repository
        .list_by_status(JobStatus::Failed)
        .await
        .unwrap();

    assert_eq!(job.status, JobStatus::Failed);
    assert_eq!(job.error_message.as_deref(), Some("Worker crashed"));
    assert!(failed.iter().any(|j| j.id == job.id));
}
