//! Delete Product Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use qrmenu_app::domain::products::records::ProductUuid;

use crate::{
    admin::errors::{Change, Entity, observed},
    extensions::*,
    state::State,
};

/// Delete Product Handler
///
/// The product image stays in storage.
#[endpoint(
    tags("admin"),
    summary = "Delete Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.admin_or_401()?;

    observed(
        state
            .app
            .workflow
            .delete_product(&admin, ProductUuid::from_uuid(product.into_inner()))
            .await,
        Entity::Product,
        Change::Delete,
    )?;

    Ok(StatusCode::OK)
}
