use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{TranslationError, TranslationWorker};
use crate::domain::Language;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Translates through any OpenAI-compatible chat completions endpoint.
pub struct OpenAiTranslator {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl OpenAiTranslator {
    pub fn new(api_key: String, model: String, base_url: Option<String>) -> Self {
        let base = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self {
            client: Client::new(),
            endpoint: format!("{}/chat/completions", base.trim_end_matches('/')),
            api_key,
            model,
        }
    }

    fn system_prompt(source: Language, target: Language) -> String {
        format!(
            "You are a professional document translator. Translate the user's document from \
             {} to {}. Preserve paragraphs, lists and line breaks. Reply with the translated \
             document only, without commentary.",
            source.name(),
            target.name()
        )
    }
}

#[async_trait]
impl TranslationWorker for OpenAiTranslator {
    async fn translate(
        &self,
        text: &str,
        source_language: Language,
        target_language: Language,
    ) -> Result<String, TranslationError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: Self::system_prompt(source_language, target_language),
                },
                ChatMessage {
                    role: "user",
                    content: text.to_string(),
                },
            ],
            temperature: 0.2,
        };

        tracing::debug!(endpoint = %self.endpoint, model = %self.model, "Sending translation request");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| TranslationError::ApiRequestFailed(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TranslationError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status.is_client_error() {
                if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(&body) {
                    return Err(TranslationError::Rejected(parsed.error.message));
                }
            }
            return Err(TranslationError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| TranslationError::InvalidResponse(e.to_string()))?;

        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| TranslationError::InvalidResponse("no choices returned".to_string()))?;

        tracing::info!(chars = content.len(), "Translation response received");
        Ok(content.trim().to_string())
    }
}
