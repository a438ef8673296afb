use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use bytes::Bytes;
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;

use lingua_relay::application::ports::JobFeed;
use lingua_relay::application::services::{JobPoller, PollerConfig, PollerState};
use lingua_relay::infrastructure::http::HttpJobClient;
use lingua_relay::infrastructure::observability::{TracingConfig, init_tracing};
use lingua_relay::presentation::Settings;

#[derive(Parser)]
#[command(author, version, about, long_about = None, name = "lingua-client")]
struct Cli {
    /// Base URL of the translation service.
    #[arg(long, env = "LINGUA_SERVER_URL", default_value = "http://localhost:3000")]
    server: String,

    #[arg(long, default_value_t = 30)]
    request_timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Upload a document and wait for its translation.
    Translate {
        file: PathBuf,

        #[arg(short, long)]
        from: String,

        #[arg(short, long)]
        to: String,

        /// Overrides `APP__POLLER__INTERVAL_SECS`.
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        interval_secs: Option<u64>,

        /// Lifetime requested for the download link. Overrides
        /// `APP__POLLER__DOWNLOAD_URL_TTL_SECS`.
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        link_ttl_secs: Option<u64>,
    },

    /// Print the current state of a translation.
    Status { id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&TracingConfig {
        default_filter: "warn,lingua_relay=info".to_string(),
        ..TracingConfig::default()
    })?;

    let client = Arc::new(
        HttpJobClient::new(&cli.server, Duration::from_secs(cli.request_timeout_secs))
            .context("Failed to build HTTP client")?,
    );

    match cli.command {
        Command::Translate {
            file,
            from,
            to,
            interval_secs,
            link_ttl_secs,
        } => {
            let data = tokio::fs::read(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let filename = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "upload".to_string());

            let (settings, _) = Settings::load().context("Failed to load poller settings")?;
            let mut config = PollerConfig::from(&settings);
            if let Some(secs) = interval_secs {
                config.interval = Duration::from_secs(secs);
            }
            if let Some(secs) = link_ttl_secs {
                config.download_url_ttl = Duration::from_secs(secs);
            }
            let mut poller = JobPoller::new(client.clone(), client, config);
            let mut updates = poller.subscribe();
            let printer = tokio::spawn(async move {
                while updates.changed().await.is_ok() {
                    let state = updates.borrow_and_update().clone();
                    print_state(&state);
                }
            });

            poller
                .submit(&filename, None, Bytes::from(data), &from, &to)
                .await?;

            let cancel = CancellationToken::new();
            let ctrl_c = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    ctrl_c.cancel();
                }
            });

            let final_state = poller.run(cancel).await;
            drop(poller);
            let _ = printer.await;

            match final_state {
                PollerState::Resolved { download_url, .. } => println!("{}", download_url),
                PollerState::Errored { message, .. } => bail!(message),
                _ => bail!("Cancelled before the translation finished"),
            }
        }
        Command::Status { id } => {
            let job_id = id.parse().context("Invalid translation ID")?;
            let job = client.fetch_job(job_id).await?;
            println!("{} {}", job.id, job.status);
            if let Some(message) = job.error_message {
                println!("error: {}", message);
            }
            if let Some(path) = job.translated_file {
                println!("translated: {}", path);
            }
        }
    }

    Ok(())
}

fn print_state(state: &PollerState) {
    match state {
        PollerState::Idle => {}
        PollerState::Submitting => eprintln!("Uploading..."),
        PollerState::Polling { job_id } => eprintln!("Translating {}...", job_id),
        PollerState::Redirecting { job_id } => eprintln!("Fetching download link for {}", job_id),
        PollerState::Resolved { .. } => eprintln!("Done"),
        PollerState::Errored { message, .. } => eprintln!("Error: {}", message),
    }
}
