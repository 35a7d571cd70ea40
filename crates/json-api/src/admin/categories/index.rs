//! Admin Category Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use qrmenu_app::{domain::catalog::search, locales::Locale};

use crate::{admin::models::AdminCategoryResponse, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AdminCategoriesResponse {
    pub categories: Vec<AdminCategoryResponse>,
}

/// Admin Category Index Handler
///
/// Re-reads the catalog, then lists categories whose name in `lang`
/// contains `q`.
#[endpoint(tags("admin"), summary = "List Categories", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    q: QueryParam<String, false>,
    lang: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<AdminCategoriesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    depot.admin_or_401()?;

    let locale = Locale::from_param(lang.into_inner().as_deref());
    let term = q.into_inner().unwrap_or_default();

    let snapshot = state
        .app
        .view
        .refresh()
        .await
        .or_500("failed to refresh catalog")?;

    Ok(Json(AdminCategoriesResponse {
        categories: search(&snapshot.categories, &term, locale)
            .into_iter()
            .map(|category| AdminCategoryResponse::render(state, category))
            .collect(),
    }))
}
