//! Update Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use qrmenu_app::domain::products::records::ProductUuid;

use crate::{
    admin::{
        errors::{Change, Entity, observed},
        forms::{form_token, product_form},
        models::AdminProductResponse,
    },
    extensions::*,
    state::State,
};

/// Update Product Handler
///
/// Overwrites names, descriptions, price and category. The image is
/// replaced only when a new `image` file is sent.
#[endpoint(
    tags("admin"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::CONFLICT, description = "Form already being submitted"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Image upload failed"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<AdminProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.admin_or_401()?;

    let token = form_token(req);
    let form = product_form(req).await?;

    let updated = observed(
        state
            .app
            .workflow
            .update_product(&admin, ProductUuid::from_uuid(product.into_inner()), form, token)
            .await,
        Entity::Product,
        Change::Update,
    )?;

    Ok(Json(AdminProductResponse::render(state, &updated)))
}
