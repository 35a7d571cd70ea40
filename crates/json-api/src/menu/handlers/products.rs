//! Menu Product List Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use qrmenu_app::{
    domain::{
        catalog::{products_in_category, search},
        categories::records::CategoryUuid,
    },
    locales::Locale,
};

use crate::{extensions::*, menu::models::MenuProductResponse, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MenuProductsResponse {
    /// Locale the texts were rendered in
    pub lang: String,

    pub products: Vec<MenuProductResponse>,
}

/// Menu Product List Handler
///
/// Lists products, optionally narrowed to one category and to names
/// containing `q` in the requested language.
#[endpoint(tags("menu"), summary = "List Menu Products")]
pub(crate) async fn handler(
    lang: QueryParam<String, false>,
    category: QueryParam<Uuid, false>,
    q: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<MenuProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let locale = Locale::from_param(lang.into_inner().as_deref());
    let term = q.into_inner().unwrap_or_default();

    let snapshot = state
        .app
        .view
        .loaded()
        .await
        .or_500("failed to load catalog")?;

    let mut found = search(&snapshot.products, &term, locale);

    if let Some(category) = category.into_inner() {
        found = products_in_category(found, CategoryUuid::from_uuid(category));
    }

    Ok(Json(MenuProductsResponse {
        lang: locale.code().to_string(),
        products: found
            .into_iter()
            .map(|product| MenuProductResponse::render(state, product, locale))
            .collect(),
    }))
}
