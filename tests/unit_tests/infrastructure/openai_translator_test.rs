use axum::Router;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use lingua_relay::application::ports::{TranslationError, TranslationWorker};
use lingua_relay::domain::Language;
use lingua_relay::infrastructure::translation::{OpenAiTranslator, SimulatedTranslator};

async fn start_mock_openai_server(
    response_status: u16,
    response_body: &'static str,
) -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let app = Router::new().route(
        "/v1/chat/completions",
        post(move || async move {
            let status = StatusCode::from_u16(response_status).unwrap();
            (
                status,
                [(axum::http::header::CONTENT_TYPE, "application/json")],
                response_body,
            )
                .into_response()
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}/v1", addr);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, shutdown_tx)
}

fn translator(base_url: String) -> OpenAiTranslator {
    OpenAiTranslator::new(
        "test-key".to_string(),
        "gpt-4o-mini".to_string(),
        Some(base_url),
    )
}

#[tokio::test]
async fn given_successful_completion_when_translating_then_returns_message_content() {
    let body = r#"{"choices":[{"message":{"role":"assistant","content":"Hola mundo"}}]}"#;
    let (base_url, shutdown_tx) = start_mock_openai_server(200, body).await;

    let result = translator(base_url)
        .translate("Hello world", Language::En, Language::Es)
        .await;

    assert_eq!(result.unwrap(), "Hola mundo");
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_client_error_with_message_when_translating_then_returns_rejection_verbatim() {
    let body = r#"{"error":{"message":"Unsupported document format","type":"invalid_request_error"}}"#;
    let (base_url, shutdown_tx) = start_mock_openai_server(400, body).await;

    let result = translator(base_url)
        .translate("Hello", Language::En, Language::Es)
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err, TranslationError::Rejected(_)));
    assert_eq!(err.to_string(), "Unsupported document format");
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_rate_limit_when_translating_then_returns_rate_limited() {
    let (base_url, shutdown_tx) = start_mock_openai_server(429, "{}").await;

    let result = translator(base_url)
        .translate("Hello", Language::En, Language::Es)
        .await;

    assert!(matches!(result, Err(TranslationError::RateLimited)));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_server_error_when_translating_then_returns_api_failure() {
    let (base_url, shutdown_tx) = start_mock_openai_server(503, "upstream down").await;

    let result = translator(base_url)
        .translate("Hello", Language::En, Language::Es)
        .await;

    assert!(matches!(result, Err(TranslationError::ApiRequestFailed(_))));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_no_choices_when_translating_then_returns_invalid_response() {
    let (base_url, shutdown_tx) = start_mock_openai_server(200, r#"{"choices":[]}"#).await;

    let result = translator(base_url)
        .translate("Hello", Language::En, Language::Es)
        .await;

    assert!(matches!(result, Err(TranslationError::InvalidResponse(_))));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_simulated_translator_when_translating_then_marks_output() {
    let result = SimulatedTranslator
        .translate("Hello", Language::En, Language::Fr)
        .await
        .unwrap();

    assert_eq!(result, "[Simulated translation from en to fr]\n\nHello");
}
