//! Admin Product Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use qrmenu_app::{
    domain::{
        catalog::{products_in_category, search},
        categories::records::CategoryUuid,
    },
    locales::Locale,
};

use crate::{admin::models::AdminProductResponse, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AdminProductsResponse {
    pub products: Vec<AdminProductResponse>,
}

/// Admin Product Index Handler
///
/// Re-reads the catalog, then lists products matching `q` in `lang`,
/// optionally limited to one category.
#[endpoint(tags("admin"), summary = "List Products", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    q: QueryParam<String, false>,
    lang: QueryParam<String, false>,
    category: QueryParam<Uuid, false>,
    depot: &mut Depot,
) -> Result<Json<AdminProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    depot.admin_or_401()?;

    let locale = Locale::from_param(lang.into_inner().as_deref());
    let term = q.into_inner().unwrap_or_default();

    let snapshot = state
        .app
        .view
        .refresh()
        .await
        .or_500("failed to refresh catalog")?;

    let mut found = search(&snapshot.products, &term, locale);

    if let Some(category) = category.into_inner() {
        found = products_in_category(found, CategoryUuid::from_uuid(category));
    }

    Ok(Json(AdminProductsResponse {
        products: found
            .into_iter()
            .map(|product| AdminProductResponse::render(state, product))
            .collect(),
    }))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use qrmenu_app::domain::products::{ProductsServiceError, records::ProductUuid};

    use crate::test_helpers::{MockApp, make_product};

    use super::*;

    fn make_service(app: MockApp) -> Service {
        app.admin_service(Router::with_path("admin/products").get(handler))
    }

    #[tokio::test]
    async fn test_index_lists_products_with_all_locales() -> TestResult {
        let soups = CategoryUuid::new();

        let app = MockApp::new().with_public_urls().with_catalog(
            vec![],
            vec![
                make_product(ProductUuid::new(), Some(soups), "Mercimek", "Lentil", Some(Decimal::new(85, 0))),
                make_product(ProductUuid::new(), None, "Ayran", "Ayran", None),
            ],
        );

        let response: AdminProductsResponse = TestClient::get("http://example.com/admin/products")
            .send(&make_service(app))
            .await
            .take_json()
            .await?;

        let lentil = response.products.first().ok_or("no products")?;

        assert_eq!(response.products.len(), 2);
        assert_eq!(lentil.category, Some(soups.into_uuid()));
        assert_eq!(lentil.description.en, "Lentil description");
        assert_eq!(lentil.price.as_deref(), Some("85"));
        assert_eq!(response.products.get(1).and_then(|p| p.price.clone()), None);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_filters_by_category_and_term() -> TestResult {
        let soups = CategoryUuid::new();

        let app = MockApp::new().with_public_urls().with_catalog(
            vec![],
            vec![
                make_product(ProductUuid::new(), Some(soups), "Mercimek", "Lentil", None),
                make_product(ProductUuid::new(), Some(soups), "Yayla", "Yogurt Soup", None),
                make_product(ProductUuid::new(), None, "Mercimek Köftesi", "Lentil Balls", None),
            ],
        );

        let response: AdminProductsResponse = TestClient::get(format!(
            "http://example.com/admin/products?q=merc&category={soups}"
        ))
        .send(&make_service(app))
        .await
        .take_json()
        .await?;

        let names: Vec<&str> = response.products.iter().map(|p| p.name.tr.as_str()).collect();

        assert_eq!(names, ["Mercimek"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_refresh_failure_returns_500() -> TestResult {
        let mut app = MockApp::new();

        app.categories
            .expect_list_categories()
            .returning(|| Ok(vec![]));

        app.products
            .expect_list_products()
            .once()
            .return_once(|| Err(ProductsServiceError::InvalidData));

        let res = TestClient::get("http://example.com/admin/products")
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
