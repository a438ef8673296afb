use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::FileKind;

use super::lossy_text_adapter::LossyTextAdapter;
use super::plain_text_adapter::PlainTextAdapter;

/// Routes each upload to the loader registered for its kind.
pub struct CompositeFileLoader {
    adapters: HashMap<FileKind, Arc<dyn FileLoader>>,
}

impl CompositeFileLoader {
    pub fn new(adapters: Vec<(FileKind, Arc<dyn FileLoader>)>) -> Self {
        Self {
            adapters: adapters.into_iter().collect(),
        }
    }

    /// Plain text for `.txt`, sanitized lossy decoding for every other supported kind.
    pub fn with_defaults() -> Self {
        let lossy: Arc<dyn FileLoader> = Arc::new(LossyTextAdapter);
        Self::new(vec![
            (FileKind::Text, Arc::new(PlainTextAdapter)),
            (FileKind::Pdf, Arc::clone(&lossy)),
            (FileKind::Doc, Arc::clone(&lossy)),
            (FileKind::Docx, lossy),
        ])
    }
}

#[async_trait]
impl FileLoader for CompositeFileLoader {
    async fn extract_text(&self, data: &[u8], kind: FileKind) -> Result<String, FileLoaderError> {
        let adapter = self.adapters.get(&kind).ok_or_else(|| {
            FileLoaderError::UnsupportedContentType(kind.as_mime().to_string())
        })?;

        adapter.extract_text(data, kind).await
    }
}
