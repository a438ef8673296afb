use lingua_relay::application::ports::TranslationError;
use lingua_relay::domain::Language;
use lingua_relay::infrastructure::translation::TranslatorFactory;
use lingua_relay::presentation::config::{TranslationProviderSetting, TranslationSettings};

#[tokio::test]
async fn given_simulated_provider_when_creating_then_worker_translates_locally() {
    let worker = TranslatorFactory::create(&TranslationSettings::default()).unwrap();

    let result = worker.translate("Hi", Language::En, Language::De).await;

    assert!(result.unwrap().ends_with("Hi"));
}

#[test]
fn given_openai_provider_without_key_when_creating_then_fails() {
    let settings = TranslationSettings {
        provider: TranslationProviderSetting::OpenAi,
        api_key: Some(String::new()),
        ..TranslationSettings::default()
    };

    let result = TranslatorFactory::create(&settings);

    assert!(matches!(result, Err(TranslationError::ApiRequestFailed(_))));
}

#[test]
fn given_openai_provider_with_key_when_creating_then_succeeds() {
    let settings = TranslationSettings {
        provider: TranslationProviderSetting::OpenAi,
        api_key: Some("sk-test".to_string()),
        ..TranslationSettings::default()
    };

    assert!(TranslatorFactory::create(&settings).is_ok());
}
