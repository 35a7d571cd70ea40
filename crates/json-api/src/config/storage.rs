//! Storage Config

use clap::Args;

use qrmenu_app::images::StorageConfig;

/// Image object storage settings.
#[derive(Debug, Args)]
pub struct StorageSettings {
    /// Object storage base URL
    #[arg(long = "storage-url", env = "STORAGE_URL")]
    pub url: String,

    /// Object storage service key
    #[arg(long = "storage-service-key", env = "STORAGE_SERVICE_KEY", hide_env_values = true)]
    pub service_key: String,

    /// Base URL for public image links, when it differs from the storage URL
    #[arg(long = "storage-public-url", env = "STORAGE_PUBLIC_URL")]
    pub public_url: Option<String>,
}

impl From<StorageSettings> for StorageConfig {
    fn from(settings: StorageSettings) -> Self {
        Self {
            url: settings.url,
            service_key: settings.service_key,
            public_url: settings.public_url,
        }
    }
}
