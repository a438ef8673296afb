use std::fmt;

use super::{FileKind, JobId};

const TRANSLATED_PREFIX: &str = "translated";

/// Location of a blob inside the blob store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoragePath(String);

impl StoragePath {
    /// Path of an uploaded source file: `{job_id}/{filename}`.
    ///
    /// The stored name always ends in the extension of `kind`, so the kind
    /// detected at upload time can be recovered from the path alone.
    pub fn source(job_id: &JobId, filename: &str, kind: FileKind) -> Self {
        let mut name = sanitize_filename(filename);
        if FileKind::from_filename(&name) != Some(kind) {
            name.push('.');
            name.push_str(kind.extension());
        }
        Self(format!("{}/{}", job_id.as_uuid(), name))
    }

    /// Kind recorded in the file extension, if any.
    pub fn file_kind(&self) -> Option<FileKind> {
        FileKind::from_filename(self.file_name())
    }

    /// Path of the translated output: `translated/{job_id}.txt`.
    pub fn translated(job_id: &JobId) -> Self {
        Self(format!("{}/{}.txt", TRANSLATED_PREFIX, job_id.as_uuid()))
    }

    pub fn from_raw(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for StoragePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}
