//! Admin Logout Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    admin::{errors::session_error, middleware::bearer_token},
    extensions::*,
    state::State,
};

/// Admin Logout Handler
///
/// Ends the session named by the bearer token.
#[endpoint(
    tags("admin"),
    summary = "Admin Logout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Session closed"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unknown or expired session"),
    ),
)]
pub(crate) async fn handler(req: &mut Request, depot: &mut Depot) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let token = bearer_token(req)
        .ok_or_else(|| StatusError::unauthorized().brief("Oturum geçersiz."))?;

    state
        .app
        .admin
        .logout(token)
        .await
        .map_err(session_error)?;

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use salvo::{http::header::AUTHORIZATION, test::TestClient};
    use testresult::TestResult;

    use qrmenu_app::admin::AdminGateError;

    use crate::test_helpers::MockApp;

    use super::*;

    fn make_service(app: MockApp) -> Service {
        app.public_service(Router::with_path("admin/session").delete(handler))
    }

    #[tokio::test]
    async fn test_logout_closes_session() -> TestResult {
        let mut app = MockApp::new();

        app.admin
            .expect_logout()
            .once()
            .withf(|token| token == "qm_v1_token")
            .return_once(|_| Ok(()));

        let res = TestClient::delete("http://example.com/admin/session")
            .add_header(AUTHORIZATION, "Bearer qm_v1_token", true)
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_logout_unknown_session_returns_401() -> TestResult {
        let mut app = MockApp::new();

        app.admin
            .expect_logout()
            .once()
            .return_once(|_| Err(AdminGateError::NotFound));

        let res = TestClient::delete("http://example.com/admin/session")
            .add_header(AUTHORIZATION, "Bearer qm_v1_gone", true)
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_logout_without_token_returns_401() -> TestResult {
        let mut app = MockApp::new();

        app.admin.expect_logout().never();

        let res = TestClient::delete("http://example.com/admin/session")
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
