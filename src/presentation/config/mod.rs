mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    DatabaseSettings, LoggingSettings, PollerSettings, ServerSettings, Settings,
    StorageProviderSetting, StorageSettings, TranslationProviderSetting, TranslationSettings,
    UploadSettings,
};
