use async_trait::async_trait;

use crate::application::ports::{TranslationError, TranslationWorker};
use crate::domain::Language;

/// Stand-in worker that echoes the source under a marker line. Lets the full
/// lifecycle run locally without a translation backend.
pub struct SimulatedTranslator;

#[async_trait]
impl TranslationWorker for SimulatedTranslator {
    async fn translate(
        &self,
        text: &str,
        source_language: Language,
        target_language: Language,
    ) -> Result<String, TranslationError> {
        Ok(format!(
            "[Simulated translation from {} to {}]\n\n{}",
            source_language, target_language, text
        ))
    }
}
