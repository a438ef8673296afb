mod file_kind;
mod job_id;
mod job_status;
mod language;
mod storage_path;
mod translation_job;
mod translation_request;

pub use file_kind::FileKind;
pub use job_id::JobId;
pub use job_status::JobStatus;
pub use language::Language;
pub use storage_path::StoragePath;
pub use translation_job::{JobUpdate, TransitionError, TranslationJob};
pub use translation_request::{InputError, TranslationRequest};
