use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use crate::application::ports::{JobRepository, RepositoryError};
use crate::domain::{
    JobId, JobStatus, JobUpdate, Language, StoragePath, TransitionError, TranslationJob,
};

const SELECT_COLUMNS: &str = r#"
    SELECT id, source_language, target_language, source_file_path, original_filename,
           translated_file_path, status, error_message, created_at, updated_at
    FROM translations
"#;

pub struct PgJobRepository {
    pool: PgPool,
}

impl PgJobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn current_status(&self, id: JobId) -> Result<Option<JobStatus>, RepositoryError> {
        let row = sqlx::query("SELECT status FROM translations WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        row.map(|r| {
            let status: String = r
                .try_get("status")
                .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;
            status.parse::<JobStatus>().map_err(RepositoryError::QueryFailed)
        })
        .transpose()
    }
}

fn map_row(row: &PgRow) -> Result<TranslationJob, RepositoryError> {
    let query_failed = |e: sqlx::Error| RepositoryError::QueryFailed(e.to_string());

    let id: Uuid = row.try_get("id").map_err(query_failed)?;
    let source_language: String = row.try_get("source_language").map_err(query_failed)?;
    let target_language: String = row.try_get("target_language").map_err(query_failed)?;
    let source_file_path: String = row.try_get("source_file_path").map_err(query_failed)?;
    let original_filename: String = row.try_get("original_filename").map_err(query_failed)?;
    let translated_file_path: Option<String> =
        row.try_get("translated_file_path").map_err(query_failed)?;
    let status: String = row.try_get("status").map_err(query_failed)?;
    let error_message: Option<String> = row.try_get("error_message").map_err(query_failed)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(query_failed)?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(query_failed)?;

    Ok(TranslationJob {
        id: JobId::from_uuid(id),
        source_language: source_language
            .parse::<Language>()
            .map_err(RepositoryError::QueryFailed)?,
        target_language: target_language
            .parse::<Language>()
            .map_err(RepositoryError::QueryFailed)?,
        source_file: StoragePath::from_raw(source_file_path),
        original_filename,
        translated_file: translated_file_path.map(StoragePath::from_raw),
        status: status
            .parse::<JobStatus>()
            .map_err(RepositoryError::QueryFailed)?,
        error_message,
        created_at,
        updated_at,
    })
}

#[async_trait]
impl JobRepository for PgJobRepository {
    #[instrument(skip(self, job), fields(job_id = %job.id))]
    async fn create(&self, job: &TranslationJob) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO translations (
                id, source_language, target_language, source_file_path, original_filename,
                translated_file_path, status, error_message, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(job.id.as_uuid())
        .bind(job.source_language.code())
        .bind(job.target_language.code())
        .bind(job.source_file.as_str())
        .bind(&job.original_filename)
        .bind(job.translated_file.as_ref().map(|p| p.as_str().to_string()))
        .bind(job.status.as_str())
        .bind(&job.error_message)
        .bind(job.created_at)
        .bind(job.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() || db.is_check_violation() => {
                RepositoryError::ConstraintViolation(db.to_string())
            }
            other => RepositoryError::QueryFailed(other.to_string()),
        })?;

        Ok(())
    }

    #[instrument(skip(self), fields(job_id = %id))]
    async fn get_by_id(&self, id: JobId) -> Result<Option<TranslationJob>, RepositoryError> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = $1"))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        row.as_ref().map(map_row).transpose()
    }

    #[instrument(skip(self, update), fields(job_id = %id, status = %update.status()))]
    async fn update(&self, id: JobId, update: JobUpdate) -> Result<(), RepositoryError> {
        let next = update.status();
        let expected = update.required_status();
        let (translated_file, error_message) = match &update {
            JobUpdate::Processing => (None, None),
            JobUpdate::Completed { translated_file } => {
                (Some(translated_file.as_str().to_string()), None)
            }
            JobUpdate::Failed { error_message } => (None, Some(error_message.clone())),
        };

        // Status and its companion fields change in one statement, guarded by
        // the expected predecessor status.
        let result = sqlx::query(
            r#"
            UPDATE translations
            SET status = $1, translated_file_path = $2, error_message = $3, updated_at = $4
            WHERE id = $5 AND status = $6
            "#,
        )
        .bind(next.as_str())
        .bind(translated_file)
        .bind(error_message)
        .bind(Utc::now())
        .bind(id.as_uuid())
        .bind(expected.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        if result.rows_affected() == 1 {
            return Ok(());
        }

        match self.current_status(id).await? {
            None => Err(RepositoryError::NotFound(id.to_string())),
            Some(from) => Err(TransitionError { from, to: next }.into()),
        }
    }

    #[instrument(skip(self), fields(job_id = %id))]
    async fn claim(&self, id: JobId) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE translations
            SET status = $1, updated_at = $2
            WHERE id = $3 AND status = $4
            "#,
        )
        .bind(JobStatus::Processing.as_str())
        .bind(Utc::now())
        .bind(id.as_uuid())
        .bind(JobStatus::Pending.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        if result.rows_affected() == 1 {
            return Ok(true);
        }

        match self.current_status(id).await? {
            None => Err(RepositoryError::NotFound(id.to_string())),
            Some(_) => Ok(false),
        }
    }

    #[instrument(skip(self), fields(status = %status))]
    async fn list_by_status(
        &self,
        status: JobStatus,
    ) -> Result<Vec<TranslationJob>, RepositoryError> {
        let rows = sqlx::query(&format!(
            "{SELECT_COLUMNS} WHERE status = ANY($1) ORDER BY created_at DESC"
        ))
        .bind(status.stored_names())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        rows.iter().map(map_row).collect()
    }
}
