//! Observability setup and request tracing middleware.

use thiserror::Error;

mod logging;
mod metrics;
mod request;
mod settings;

pub(crate) use metrics::{metrics_handler, observe_catalog_change};
pub(crate) use request::request_logging;

use crate::config::ServerConfig;

/// Errors raised while initialising observability.
#[derive(Debug, Error)]
pub(crate) enum ObservabilityError {
    /// Failed to initialise tracing subscriber.
    #[error("failed to initialise tracing subscriber: {0}")]
    TracingSubscriber(#[from] tracing_subscriber::util::TryInitError),
}

/// Install the global subscriber and apply runtime request settings.
pub(crate) fn init(config: &ServerConfig) -> Result<(), ObservabilityError> {
    settings::apply_runtime_config(config);

    logging::init_subscriber(config)
}
