//! Admin Config

use clap::Args;
use jiff::SignedDuration;

use qrmenu_app::{admin::AdminPassword, context::AdminConfig};

/// Admin console settings.
#[derive(Debug, Args)]
pub struct AdminSettings {
    /// Shared admin password
    #[arg(long = "admin-password", env = "ADMIN_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Minutes an admin session stays valid
    #[arg(
        long = "admin-session-ttl-minutes",
        env = "ADMIN_SESSION_TTL_MINUTES",
        default_value_t = 720
    )]
    pub session_ttl_minutes: u32,
}

impl From<AdminSettings> for AdminConfig {
    fn from(settings: AdminSettings) -> Self {
        Self {
            password: AdminPassword::new(settings.password),
            session_ttl: SignedDuration::from_mins(i64::from(settings.session_ttl_minutes)),
        }
    }
}
