use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::{mpsc, oneshot};

use lingua_relay::application::ports::{BlobStore, JobRepository, TranslationWorker};
use lingua_relay::application::services::{
    JobController, SubmissionService, TranslationDispatcher,
};
use lingua_relay::infrastructure::persistence::InMemoryJobRepository;
use lingua_relay::infrastructure::storage::{LocalBlobStore, UrlSigner};
use lingua_relay::infrastructure::text_processing::CompositeFileLoader;
use lingua_relay::presentation::{AppState, Settings, create_router};

pub const BOUNDARY: &str = "lingua-test-boundary";

pub struct TestApp {
    pub state: AppState,
    _storage: tempfile::TempDir,
}

pub fn test_settings(public_base_url: &str) -> Settings {
    let mut settings = Settings::default();
    settings.server.public_base_url = public_base_url.to_string();
    settings.uploads.max_file_size_mb = 1;
    settings
}

/// Wires the real services over an in-memory job store and a temporary local
/// blob directory. With `dispatch` set, created jobs are processed right away.
pub fn build_app(
    settings: Settings,
    worker: Arc<dyn TranslationWorker>,
    dispatch: bool,
) -> TestApp {
    let storage = tempfile::TempDir::new().unwrap();
    let url_signer = Arc::new(UrlSigner::new(
        "test-secret",
        settings.server.public_base_url.clone(),
    ));
    let job_repository: Arc<dyn JobRepository> = Arc::new(InMemoryJobRepository::new());
    let blob_store: Arc<dyn BlobStore> = Arc::new(
        LocalBlobStore::new(storage.path().to_path_buf(), Arc::clone(&url_signer)).unwrap(),
    );
    let job_controller = Arc::new(JobController::new(
        Arc::clone(&job_repository),
        Arc::clone(&blob_store),
        Arc::new(CompositeFileLoader::with_defaults()),
        worker,
        Duration::from_secs(5),
    ));

    let sender = dispatch.then(|| {
        let (sender, receiver) = mpsc::channel(16);
        tokio::spawn(TranslationDispatcher::new(receiver, Arc::clone(&job_controller), 2).run());
        sender
    });

    let submission_service = Arc::new(SubmissionService::new(
        Arc::clone(&job_repository),
        Arc::clone(&blob_store),
        sender,
    ));

    TestApp {
        state: AppState {
            job_repository,
            blob_store,
            submission_service,
            job_controller,
            url_signer,
            settings: Arc::new(settings),
        },
        _storage: storage,
    }
}

/// Serves `app` on an ephemeral port. The base URL must be known before the
/// app is built, so the listener is bound first.
pub async fn spawn_server(
    build: impl FnOnce(String) -> TestApp,
) -> (String, TestApp, oneshot::Sender<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let app = build(base_url.clone());
    let router = create_router(app.state.clone());
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, app, shutdown_tx)
}

pub fn multipart_body(
    file: Option<(&str, &str, &[u8])>,
    source_language: &str,
    target_language: &str,
) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in [
        ("source_language", source_language),
        ("target_language", target_language),
    ] {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((filename, mime, data)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: {mime}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}
