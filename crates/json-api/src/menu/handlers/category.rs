//! Menu Category Detail Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{PathParam, QueryParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use qrmenu_app::{
    domain::categories::{CategoriesServiceError, records::CategoryUuid},
    locales::Locale,
};

use crate::{
    extensions::*,
    menu::models::{MenuCategoryResponse, MenuProductResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MenuCategoryDetailResponse {
    /// Locale the texts were rendered in
    pub lang: String,

    pub category: MenuCategoryResponse,
    pub products: Vec<MenuProductResponse>,
}

/// Menu Category Detail Handler
///
/// Returns one category together with the products filed under it.
#[endpoint(
    tags("menu"),
    summary = "Get Menu Category",
    responses(
        (status_code = StatusCode::OK, description = "Category found"),
        (status_code = StatusCode::NOT_FOUND, description = "Category not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    category: PathParam<Uuid>,
    lang: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<MenuCategoryDetailResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let locale = Locale::from_param(lang.into_inner().as_deref());
    let uuid = CategoryUuid::from_uuid(category.into_inner());

    let category = state
        .app
        .categories
        .get_category(uuid)
        .await
        .map_err(|error| match error {
            CategoriesServiceError::NotFound => {
                StatusError::not_found().brief("Kategori bulunamadı.")
            }
            other => {
                error!("failed to fetch category: {other}");

                StatusError::internal_server_error()
            }
        })?;

    let products = state
        .app
        .products
        .list_products_in_category(uuid)
        .await
        .or_500("failed to fetch category products")?;

    Ok(Json(MenuCategoryDetailResponse {
        lang: locale.code().to_string(),
        category: MenuCategoryResponse::render(state, &category, locale),
        products: products
            .iter()
            .map(|product| MenuProductResponse::render(state, product, locale))
            .collect(),
    }))
}
