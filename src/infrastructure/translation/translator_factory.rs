use std::sync::Arc;

use crate::application::ports::{TranslationError, TranslationWorker};
use crate::presentation::config::{TranslationProviderSetting, TranslationSettings};

use super::openai_translator::OpenAiTranslator;
use super::simulated_translator::SimulatedTranslator;

pub struct TranslatorFactory;

impl TranslatorFactory {
    pub fn create(
        settings: &TranslationSettings,
    ) -> Result<Arc<dyn TranslationWorker>, TranslationError> {
        match settings.provider {
            TranslationProviderSetting::Simulated => Ok(Arc::new(SimulatedTranslator)),
            TranslationProviderSetting::OpenAi => {
                let key = settings
                    .api_key
                    .clone()
                    .filter(|k| !k.is_empty())
                    .ok_or_else(|| {
                        TranslationError::ApiRequestFailed(
                            "API key required for the openai translation provider".to_string(),
                        )
                    })?;
                Ok(Arc::new(OpenAiTranslator::new(
                    key,
                    settings.model.clone(),
                    settings.base_url.clone(),
                )))
            }
        }
    }
}
