//! Admin session middleware.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};

use crate::{admin::errors::session_error, extensions::*, state::State};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = bearer_token(req) else {
        res.render(StatusError::unauthorized().brief("Oturum geçersiz."));
        ctrl.skip_rest();

        return;
    };

    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => state,
        Err(_error) => {
            res.render(StatusError::internal_server_error());
            ctrl.skip_rest();

            return;
        }
    };

    let admin = match state.app.admin.authenticate(token).await {
        Ok(admin) => admin,
        Err(error) => {
            res.render(session_error(error));
            ctrl.skip_rest();

            return;
        }
    };

    depot.insert_admin(admin);

    ctrl.call_next(req, depot, res).await;
}

/// Token from an `Authorization: Bearer <token>` header.
pub(crate) fn bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
