//! Admin Login Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{admin::errors::session_error, extensions::*, state::State};

/// Admin Login Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub password: String,
}

/// Admin Session Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SessionResponse {
    /// Bearer token for admin requests
    pub token: String,

    pub expires_at: String,
}

/// Admin Login Handler
///
/// Exchanges the shared admin password for a session token.
#[endpoint(
    tags("admin"),
    summary = "Admin Login",
    responses(
        (status_code = StatusCode::CREATED, description = "Session opened"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Wrong password"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SessionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let session = state
        .app
        .admin
        .login(&json.into_inner().password)
        .await
        .map_err(session_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(SessionResponse {
        token: session.token,
        expires_at: session.expires_at.to_string(),
    }))
}
