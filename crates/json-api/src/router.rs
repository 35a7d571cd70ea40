//! App Router

use salvo::Router;

use crate::{admin, healthcheck, languages, menu, observability};

pub fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(Router::with_path("languages").get(languages::handler))
        .push(
            Router::with_path("menu")
                .push(
                    Router::with_path("categories")
                        .get(menu::categories::handler)
                        .push(Router::with_path("{category}").get(menu::category::handler)),
                )
                .push(Router::with_path("products").get(menu::products::handler)),
        )
        .push(admin_router())
}

fn admin_router() -> Router {
    Router::with_path("admin")
        .push(
            Router::with_path("session")
                .post(admin::session::create::handler)
                .delete(admin::session::delete::handler),
        )
        .push(
            Router::new()
                .hoop(admin::middleware::handler)
                .push(Router::with_path("dashboard").get(admin::dashboard::handler))
                .push(
                    Router::with_path("categories")
                        .get(admin::categories::index::handler)
                        .post(admin::categories::create::handler)
                        .push(
                            Router::with_path("{category}")
                                .put(admin::categories::update::handler)
                                .delete(admin::categories::delete::handler),
                        ),
                )
                .push(
                    Router::with_path("products")
                        .get(admin::products::index::handler)
                        .post(admin::products::create::handler)
                        .push(
                            Router::with_path("{product}")
                                .put(admin::products::update::handler)
                                .delete(admin::products::delete::handler),
                        ),
                ),
        )
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        http::header::AUTHORIZATION,
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use qrmenu_app::admin::{AdminCapability, AdminGateError};

    use crate::{languages::LanguagesResponse, test_helpers::MockApp};

    use super::*;

    fn make_service(app: MockApp) -> Service {
        Service::new(Router::new().hoop(inject(app.into_state())).push(app_router()))
    }

    #[tokio::test]
    async fn test_public_routes_need_no_session() -> TestResult {
        let mut app = MockApp::new();

        app.admin.expect_authenticate().never();

        let response: LanguagesResponse = TestClient::get("http://example.com/languages")
            .send(&make_service(app))
            .await
            .take_json()
            .await?;

        assert_eq!(response.languages.len(), 4);

        Ok(())
    }

    #[tokio::test]
    async fn test_admin_routes_require_session() -> TestResult {
        let mut app = MockApp::new();

        app.categories.expect_count_categories().never();

        let res = TestClient::get("http://example.com/admin/dashboard")
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_admin_routes_reject_unknown_session() -> TestResult {
        let mut app = MockApp::new();

        app.admin
            .expect_authenticate()
            .once()
            .return_once(|_| Err(AdminGateError::NotFound));

        app.categories.expect_count_categories().never();

        let res = TestClient::get("http://example.com/admin/dashboard")
            .add_header(AUTHORIZATION, "Bearer qm_v1_unknown", true)
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_admin_routes_run_with_valid_session() -> TestResult {
        let mut app = MockApp::new();

        app.admin
            .expect_authenticate()
            .once()
            .withf(|token| token == "qm_v1_valid")
            .return_once(|_| Ok(AdminCapability::new(uuid::Uuid::nil())));

        app.categories
            .expect_count_categories()
            .once()
            .return_once(|| Ok(2));

        app.products
            .expect_count_products()
            .once()
            .return_once(|| Ok(9));

        let res = TestClient::get("http://example.com/admin/dashboard")
            .add_header(AUTHORIZATION, "Bearer qm_v1_valid", true)
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
