//! Create Category Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, prelude::*};

use crate::{
    admin::{
        errors::{Change, Entity, observed},
        forms::{category_form, form_token},
        models::AdminCategoryResponse,
    },
    extensions::*,
    state::State,
};

/// Create Category Handler
///
/// Multipart form with `name_tr`, `name_en`, `name_de`, `name_ru` and a
/// required `image` file.
#[endpoint(
    tags("admin"),
    summary = "Create Category",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Category created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Image missing or form unreadable"),
        (status_code = StatusCode::CONFLICT, description = "Form already being submitted"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Image upload failed"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<AdminCategoryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.admin_or_401()?;

    let token = form_token(req);
    let form = category_form(req).await?;

    let created = observed(
        state.app.workflow.add_category(&admin, form, token).await,
        Entity::Category,
        Change::Create,
    )?;

    res.add_header(LOCATION, format!("/admin/categories/{}", created.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(AdminCategoryResponse::render(state, &created)))
}
