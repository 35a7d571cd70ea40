//! Database Config

use clap::Args;
use qrmenu_app::database::{DEFAULT_MAX_CONNECTIONS, DatabaseOptions};

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    /// Upper bound on pooled catalog connections
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub database_max_connections: u32,
}

impl From<DatabaseConfig> for DatabaseOptions {
    fn from(config: DatabaseConfig) -> Self {
        Self {
            url: config.database_url,
            max_connections: config.database_max_connections,
        }
    }
}
