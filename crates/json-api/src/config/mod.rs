//! Server configuration module

use clap::Parser;

use crate::config::{
    admin::AdminSettings,
    db::DatabaseConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
    storage::StorageSettings,
};

pub(crate) mod admin;
pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod server;
pub(crate) mod storage;

pub(crate) use observability::LogFormat;

/// QR Menu JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "qrmenu-json", about = "QR Menu JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Request logging and metrics settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Catalog database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Image object storage settings.
    #[command(flatten)]
    pub storage: StorageSettings,

    /// Admin console settings.
    #[command(flatten)]
    pub admin: AdminSettings,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}
