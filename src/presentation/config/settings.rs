use std::time::Duration;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use super::Environment;
use crate::application::services::PollerConfig;

/// Service configuration. Every field has a default, so an empty environment
/// boots a local instance with an in-memory job store, filesystem blobs and
/// the simulated translator.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub storage: StorageSettings,
    pub translation: TranslationSettings,
    pub uploads: UploadSettings,
    pub poller: PollerSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Loads `.env`, then `appsettings.{environment}.*` (optional), then
    /// `APP__SECTION__KEY` environment variables.
    pub fn load() -> Result<(Self, Environment), ConfigError> {
        dotenvy::dotenv().ok();

        let environment: Environment = std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .parse()
            .map_err(ConfigError::Message)?;

        let settings = Self::load_for(environment)?;
        Ok((settings, environment))
    }

    pub fn load_for(environment: Environment) -> Result<Self, ConfigError> {
        let settings: Self = Config::builder()
            .add_source(
                File::with_name(&environment.settings_file()).required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Rejects values that would stall the dispatcher or panic a timer.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("poller.interval_secs", self.poller.interval_secs),
            (
                "poller.download_url_ttl_secs",
                self.poller.download_url_ttl_secs,
            ),
            (
                "poller.max_download_url_ttl_secs",
                self.poller.max_download_url_ttl_secs,
            ),
            (
                "translation.max_concurrent_jobs",
                self.translation.max_concurrent_jobs as u64,
            ),
        ];
        match positive.iter().find(|(_, value)| *value == 0) {
            Some((key, _)) => Err(ConfigError::Message(format!("{key} must be at least 1"))),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Externally reachable base URL, used to build signed download links.
    pub public_base_url: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            public_base_url: "http://localhost:3000".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Postgres URL. Jobs are kept in memory when unset.
    pub url: Option<String>,
    pub max_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageProviderSetting {
    Local,
    Azure,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub provider: StorageProviderSetting,
    pub local_path: String,
    /// Key for local signed download links.
    pub signing_secret: String,
    pub azure_account: Option<String>,
    pub azure_access_key: Option<String>,
    pub azure_container: Option<String>,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            provider: StorageProviderSetting::Local,
            local_path: "./data/documents".to_string(),
            signing_secret: "change-me".to_string(),
            azure_account: None,
            azure_access_key: None,
            azure_container: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProviderSetting {
    Simulated,
    #[serde(rename = "openai")]
    OpenAi,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TranslationSettings {
    pub provider: TranslationProviderSetting,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: String,
    pub timeout_secs: u64,
    pub max_concurrent_jobs: usize,
    /// Fail jobs left in `processing` by a previous run at startup.
    pub recover_on_startup: bool,
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            provider: TranslationProviderSetting::Simulated,
            api_key: None,
            base_url: None,
            model: "gpt-4o-mini".to_string(),
            timeout_secs: 300,
            max_concurrent_jobs: 4,
            recover_on_startup: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UploadSettings {
    pub max_file_size_mb: u64,
    /// Start processing as soon as a job is created.
    pub auto_process: bool,
}

impl UploadSettings {
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb * 1024 * 1024
    }
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            max_file_size_mb: 10,
            auto_process: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PollerSettings {
    pub interval_secs: u64,
    pub download_url_ttl_secs: u64,
    pub max_download_url_ttl_secs: u64,
    pub max_transient_failures: Option<u32>,
    pub deadline_secs: Option<u64>,
}

impl Default for PollerSettings {
    fn default() -> Self {
        Self {
            interval_secs: 3,
            download_url_ttl_secs: 60 * 60,
            max_download_url_ttl_secs: 24 * 60 * 60,
            max_transient_failures: Some(20),
            deadline_secs: Some(30 * 60),
        }
    }
}

impl From<&Settings> for PollerConfig {
    fn from(settings: &Settings) -> Self {
        let poller = &settings.poller;
        Self {
            interval: Duration::from_secs(poller.interval_secs),
            download_url_ttl: Duration::from_secs(poller.download_url_ttl_secs),
            max_upload_bytes: settings.uploads.max_file_size_bytes(),
            max_transient_failures: poller.max_transient_failures,
            deadline: poller.deadline_secs.map(Duration::from_secs),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub json_format: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info,lingua_relay=debug,tower_http=debug".to_string(),
            json_format: false,
        }
    }
}
