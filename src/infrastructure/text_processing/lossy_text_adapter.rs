use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::FileKind;

use super::text_sanitizer::sanitize_extracted_text;

/// Reads any upload as text, replacing invalid UTF-8 and dropping binary
/// noise. Used for office and PDF uploads, which carry no dedicated parser.
pub struct LossyTextAdapter;

#[async_trait]
impl FileLoader for LossyTextAdapter {
    #[tracing::instrument(skip(self, data), fields(bytes = data.len()))]
    async fn extract_text(&self, data: &[u8], kind: FileKind) -> Result<String, FileLoaderError> {
        let decoded = String::from_utf8_lossy(data);
        let text = sanitize_extracted_text(&decoded);

        if text.is_empty() {
            return Err(FileLoaderError::NoTextFound(format!(
                "{} document",
                kind.extension()
            )));
        }

        tracing::debug!(chars = text.len(), "Lossy text extraction complete");
        Ok(text)
    }
}
