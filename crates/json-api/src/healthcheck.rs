//! QR Menu JSON API Healthcheck Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, state::State};

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// When the menu was last read from the store; `null` before the first load
    pub catalog_loaded_at: Option<String>,

    pub categories: usize,
    pub products: usize,
}

/// Healthcheck handler
///
/// Reports liveness and the age of the cached menu. Never reads the store, so
/// a database outage does not fail the probe.
#[endpoint(tags("health"), summary = "Health check endpoint")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<HealthResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let snapshot = state.app.view.snapshot().await;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        catalog_loaded_at: snapshot.loaded_at.map(|at| at.to_string()),
        categories: snapshot.categories.len(),
        products: snapshot.products.len(),
    }))
}
