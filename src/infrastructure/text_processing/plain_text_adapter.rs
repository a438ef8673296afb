use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::FileKind;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Loads `.txt` uploads. Invalid UTF-8 sequences become U+FFFD.
pub struct PlainTextAdapter;

#[async_trait]
impl FileLoader for PlainTextAdapter {
    async fn extract_text(&self, data: &[u8], kind: FileKind) -> Result<String, FileLoaderError> {
        if kind != FileKind::Text {
            return Err(FileLoaderError::UnsupportedContentType(
                kind.as_mime().to_string(),
            ));
        }

        let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
        let text = String::from_utf8_lossy(data);

        if text.trim().is_empty() {
            return Err(FileLoaderError::NoTextFound("text file".to_string()));
        }

        Ok(text.into_owned())
    }
}
