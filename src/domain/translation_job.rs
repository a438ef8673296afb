use chrono::{DateTime, Utc};

use super::{JobId, JobStatus, Language, StoragePath};

#[derive(Debug, Clone, PartialEq)]
pub struct TranslationJob {
    pub id: JobId,
    pub source_language: Language,
    pub target_language: Language,
    pub source_file: StoragePath,
    pub original_filename: String,
    pub translated_file: Option<StoragePath>,
    pub status: JobStatus,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field changes the lifecycle controller may write to a job.
///
/// Each variant carries exactly the fields its target status requires, so a
/// completed job always has a translated file and only failed jobs carry an
/// error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobUpdate {
    Processing,
    Completed { translated_file: StoragePath },
    Failed { error_message: String },
}

impl JobUpdate {
    pub fn status(&self) -> JobStatus {
        match self {
            JobUpdate::Processing => JobStatus::Processing,
            JobUpdate::Completed { .. } => JobStatus::Completed,
            JobUpdate::Failed { .. } => JobStatus::Failed,
        }
    }

    /// The only status this update may be applied to.
    pub fn required_status(&self) -> JobStatus {
        match self {
            JobUpdate::Processing => JobStatus::Pending,
            JobUpdate::Completed { .. } | JobUpdate::Failed { .. } => JobStatus::Processing,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("illegal transition {from} -> {to}")]
pub struct TransitionError {
    pub from: JobStatus,
    pub to: JobStatus,
}

impl TranslationJob {
    pub fn new(
        id: JobId,
        source_language: Language,
        target_language: Language,
        source_file: StoragePath,
        original_filename: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            source_language,
            target_language,
            source_file,
            original_filename,
            translated_file: None,
            status: JobStatus::Pending,
            error_message: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, update: JobUpdate) -> Result<(), TransitionError> {
        let next = update.status();
        if !self.status.can_transition_to(next) {
            return Err(TransitionError {
                from: self.status,
                to: next,
            });
        }

        match update {
            JobUpdate::Processing => {}
            JobUpdate::Completed { translated_file } => {
                self.translated_file = Some(translated_file);
            }
            JobUpdate::Failed { error_message } => {
                self.error_message = Some(error_message);
            }
        }
        self.status = next;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// True when the optional fields agree with the status.
    pub fn is_consistent(&self) -> bool {
        let file_ok = self.translated_file.is_some() == (self.status == JobStatus::Completed);
        let error_ok = self.error_message.is_none() || self.status == JobStatus::Failed;
        file_ok && error_ok
    }
}
