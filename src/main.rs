use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use lingua_relay::application::ports::JobRepository;
use lingua_relay::application::services::{
    JobController, SubmissionService, TranslationDispatcher,
};
use lingua_relay::domain::JobStatus;
use lingua_relay::infrastructure::observability::{TracingConfig, init_tracing};
use lingua_relay::infrastructure::persistence::{
    InMemoryJobRepository, PgJobRepository, create_pool, run_migrations,
};
use lingua_relay::infrastructure::storage::{BlobStoreFactory, UrlSigner};
use lingua_relay::infrastructure::text_processing::CompositeFileLoader;
use lingua_relay::infrastructure::translation::TranslatorFactory;
use lingua_relay::presentation::{AppState, Settings, create_router};

const DISPATCH_QUEUE_CAPACITY: usize = 256;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (settings, environment) = Settings::load().context("Failed to load configuration")?;

    init_tracing(&TracingConfig::from_settings(
        &settings.logging,
        environment.as_str(),
    ))?;

    let job_repository: Arc<dyn JobRepository> = match &settings.database.url {
        Some(url) => {
            let pool = create_pool(url, settings.database.max_connections)
                .await
                .context("Failed to connect to Postgres")?;
            run_migrations(&pool)
                .await
                .context("Failed to run migrations")?;
            Arc::new(PgJobRepository::new(pool))
        }
        None => {
            tracing::warn!("No database URL configured, jobs are kept in memory");
            Arc::new(InMemoryJobRepository::new())
        }
    };

    let url_signer = Arc::new(UrlSigner::new(
        settings.storage.signing_secret.as_bytes().to_vec(),
        settings.server.public_base_url.clone(),
    ));
    let blob_store = BlobStoreFactory::create(&settings.storage, Arc::clone(&url_signer))
        .context("Failed to initialize blob storage")?;
    let worker = TranslatorFactory::create(&settings.translation)
        .context("Failed to initialize translation worker")?;

    let job_controller = Arc::new(JobController::new(
        Arc::clone(&job_repository),
        Arc::clone(&blob_store),
        Arc::new(CompositeFileLoader::with_defaults()),
        worker,
        Duration::from_secs(settings.translation.timeout_secs),
    ));

    if settings.translation.recover_on_startup {
        let recovered = job_controller.recover_interrupted().await?;
        if recovered > 0 {
            tracing::warn!(count = recovered, "Failed jobs interrupted by the last shutdown");
        }
    }

    let dispatch = if settings.uploads.auto_process {
        let (sender, receiver) = mpsc::channel(DISPATCH_QUEUE_CAPACITY);
        let dispatcher = TranslationDispatcher::new(
            receiver,
            Arc::clone(&job_controller),
            settings.translation.max_concurrent_jobs,
        );
        tokio::spawn(dispatcher.run());

        for job in job_repository.list_by_status(JobStatus::Pending).await? {
            tracing::info!(job_id = %job.id, "Re-queueing pending job");
            sender.send(job.id).await?;
        }
        Some(sender)
    } else {
        None
    };

    let submission_service = Arc::new(SubmissionService::new(
        Arc::clone(&job_repository),
        Arc::clone(&blob_store),
        dispatch,
    ));

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;

    let state = AppState {
        job_repository,
        blob_store,
        submission_service,
        job_controller,
        url_signer,
        settings: Arc::new(settings),
    };

    let router = create_router(state);

    tracing::info!(environment = %environment, "Listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
