//! Menu Category Grid Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use qrmenu_app::locales::Locale;

use crate::{extensions::*, menu::models::MenuCategoryResponse, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MenuCategoriesResponse {
    /// Locale the names were rendered in
    pub lang: String,

    pub categories: Vec<MenuCategoryResponse>,
}

/// Menu Category Grid Handler
///
/// Lists every category, named in the requested language.
#[endpoint(tags("menu"), summary = "List Menu Categories")]
pub(crate) async fn handler(
    lang: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<MenuCategoriesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let locale = Locale::from_param(lang.into_inner().as_deref());

    let snapshot = state
        .app
        .view
        .loaded()
        .await
        .or_500("failed to load catalog")?;

    Ok(Json(MenuCategoriesResponse {
        lang: locale.code().to_string(),
        categories: snapshot
            .categories
            .iter()
            .map(|category| MenuCategoryResponse::render(state, category, locale))
            .collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use qrmenu_app::domain::categories::{CategoriesServiceError, records::CategoryUuid};

    use crate::test_helpers::{MockApp, make_category};

    use super::*;

    fn make_service(app: MockApp) -> Service {
        app.public_service(Router::with_path("menu/categories").get(handler))
    }

    fn soups_and_desserts() -> MockApp {
        MockApp::new().with_public_urls().with_catalog(
            vec![
                make_category(CategoryUuid::new(), "Çorbalar", "Soups"),
                make_category(CategoryUuid::new(), "Tatlılar", "Desserts"),
            ],
            vec![],
        )
    }

    #[tokio::test]
    async fn test_categories_rendered_in_requested_language() -> TestResult {
        let response: MenuCategoriesResponse =
            TestClient::get("http://example.com/menu/categories?lang=en")
                .send(&make_service(soups_and_desserts()))
                .await
                .take_json()
                .await?;

        let names: Vec<&str> = response.categories.iter().map(|c| c.name.as_str()).collect();

        assert_eq!(response.lang, "en");
        assert_eq!(names, ["Soups", "Desserts"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_language_falls_back_to_turkish() -> TestResult {
        let response: MenuCategoriesResponse =
            TestClient::get("http://example.com/menu/categories?lang=fr")
                .send(&make_service(soups_and_desserts()))
                .await
                .take_json()
                .await?;

        assert_eq!(response.lang, "tr");
        assert_eq!(
            response.categories.first().map(|c| c.name.as_str()),
            Some("Çorbalar")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_categories_carry_public_image_urls() -> TestResult {
        let response: MenuCategoriesResponse = TestClient::get("http://example.com/menu/categories")
            .send(&make_service(soups_and_desserts()))
            .await
            .take_json()
            .await?;

        assert_eq!(
            response.categories.first().map(|c| c.image_url.as_str()),
            Some("https://cdn.test/category-images/1700000000000_soups.png")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_store_failure_returns_500() -> TestResult {
        let mut app = MockApp::new();

        app.categories
            .expect_list_categories()
            .once()
            .return_once(|| Err(CategoriesServiceError::InvalidData));

        app.products
            .expect_list_products()
            .returning(|| Ok(vec![]));

        let res = TestClient::get("http://example.com/menu/categories")
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
