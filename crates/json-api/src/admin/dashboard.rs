//! Admin Dashboard Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DashboardResponse {
    pub categories: u64,
    pub products: u64,
}

/// Admin Dashboard Handler
///
/// Returns the number of stored categories and products.
#[endpoint(tags("admin"), summary = "Admin Dashboard", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<DashboardResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    depot.admin_or_401()?;

    let categories = state
        .app
        .categories
        .count_categories()
        .await
        .or_500("failed to count categories")?;

    let products = state
        .app
        .products
        .count_products()
        .await
        .or_500("failed to count products")?;

    Ok(Json(DashboardResponse {
        categories,
        products,
    }))
}
