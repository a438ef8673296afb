use bytes::Bytes;

use super::{FileKind, Language};

/// A submission that passed local validation and is ready to be uploaded.
#[derive(Debug, Clone)]
pub struct TranslationRequest {
    pub filename: String,
    pub kind: FileKind,
    pub data: Bytes,
    pub source_language: Language,
    pub target_language: Language,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("Please select a file")]
    EmptyFile,
    #[error("file is {size} bytes, the limit is {max} bytes")]
    FileTooLarge { size: u64, max: u64 },
    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),
    #[error("source and target language are both {0}")]
    SameLanguage(Language),
}

impl TranslationRequest {
    /// Validates raw user input without touching the network.
    pub fn validate(
        filename: &str,
        mime: Option<&str>,
        data: Bytes,
        source_language: &str,
        target_language: &str,
        max_bytes: u64,
    ) -> Result<Self, InputError> {
        if data.is_empty() {
            return Err(InputError::EmptyFile);
        }

        let size = data.len() as u64;
        if size > max_bytes {
            return Err(InputError::FileTooLarge {
                size,
                max: max_bytes,
            });
        }

        let kind = FileKind::detect(filename, mime).ok_or_else(|| {
            InputError::UnsupportedFileType(mime.unwrap_or(filename).to_string())
        })?;

        let source_language: Language = source_language
            .parse()
            .map_err(|_| InputError::UnsupportedLanguage(source_language.to_string()))?;
        let target_language: Language = target_language
            .parse()
            .map_err(|_| InputError::UnsupportedLanguage(target_language.to_string()))?;

        if source_language == target_language {
            return Err(InputError::SameLanguage(source_language));
        }

        Ok(Self {
            filename: filename.to_string(),
            kind,
            data,
            source_language,
            target_language,
        })
    }
}
