//! Delete Category Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use qrmenu_app::domain::categories::records::CategoryUuid;

use crate::{
    admin::errors::{Change, Entity, observed},
    extensions::*,
    state::State,
};

/// Delete Category Handler
///
/// Products filed under the category and the category image are kept.
#[endpoint(
    tags("admin"),
    summary = "Delete Category",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Category deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Category not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    category: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.admin_or_401()?;

    observed(
        state
            .app
            .workflow
            .delete_category(&admin, CategoryUuid::from_uuid(category.into_inner()))
            .await,
        Entity::Category,
        Change::Delete,
    )?;

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use qrmenu_app::domain::categories::CategoriesServiceError;

    use crate::test_helpers::MockApp;

    use super::*;

    fn make_service(app: MockApp) -> Service {
        app.admin_service(Router::with_path("admin/categories/{category}").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_category_success() -> TestResult {
        let uuid = CategoryUuid::new();

        let mut app = MockApp::new().with_catalog(vec![], vec![]);

        app.categories
            .expect_delete_category()
            .once()
            .withf(move |c| *c == uuid)
            .return_once(|_| Ok(()));

        app.products.expect_delete_product().never();
        app.images.expect_remove().never();

        let res = TestClient::delete(format!("http://example.com/admin/categories/{uuid}"))
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_unknown_category_returns_404() -> TestResult {
        let uuid = CategoryUuid::new();

        let mut app = MockApp::new();

        app.categories
            .expect_delete_category()
            .once()
            .return_once(|_| Err(CategoriesServiceError::NotFound));

        let res = TestClient::delete(format!("http://example.com/admin/categories/{uuid}"))
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_invalid_uuid_returns_400() -> TestResult {
        let res = TestClient::delete("http://example.com/admin/categories/123")
            .send(&make_service(MockApp::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
