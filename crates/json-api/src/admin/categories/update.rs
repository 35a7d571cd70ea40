//! Update Category Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use qrmenu_app::domain::categories::records::CategoryUuid;

use crate::{
    admin::{
        errors::{Change, Entity, observed},
        forms::{category_form, form_token},
        models::AdminCategoryResponse,
    },
    extensions::*,
    state::State,
};

/// Update Category Handler
///
/// Overwrites all names. The image is replaced only when a new `image` file
/// is sent.
#[endpoint(
    tags("admin"),
    summary = "Update Category",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Category updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Category not found"),
        (status_code = StatusCode::CONFLICT, description = "Form already being submitted"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Image upload failed"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    category: PathParam<Uuid>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<AdminCategoryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.admin_or_401()?;

    let token = form_token(req);
    let form = category_form(req).await?;

    let updated = observed(
        state
            .app
            .workflow
            .update_category(&admin, CategoryUuid::from_uuid(category.into_inner()), form, token)
            .await,
        Entity::Category,
        Change::Update,
    )?;

    Ok(Json(AdminCategoryResponse::render(state, &updated)))
}
