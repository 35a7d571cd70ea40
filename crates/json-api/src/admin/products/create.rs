//! Create Product Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, prelude::*};

use crate::{
    admin::{
        errors::{Change, Entity, observed},
        forms::{form_token, product_form},
        models::AdminProductResponse,
    },
    extensions::*,
    state::State,
};

/// Create Product Handler
///
/// Multipart form with `name_<lang>`, `description_<lang>`, `price`,
/// `category` and a required `image` file. An unreadable price or category
/// is stored as empty.
#[endpoint(
    tags("admin"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
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
) -> Result<Json<AdminProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let admin = depot.admin_or_401()?;

    let token = form_token(req);
    let form = product_form(req).await?;

    let created = observed(
        state.app.workflow.add_product(&admin, form, token).await,
        Entity::Product,
        Change::Create,
    )?;

    res.add_header(LOCATION, format!("/admin/products/{}", created.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(AdminProductResponse::render(state, &created)))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rust_decimal::Decimal;
    use salvo::test::ResponseExt;
    use testresult::TestResult;

    use qrmenu_app::{
        domain::{
            categories::records::CategoryUuid,
            products::{ProductsServiceError, data::NewProduct, records::ProductRecord},
        },
        images::{ImageBucket, ImageStoreError},
        locales::Locale,
    };

    use crate::test_helpers::{MockApp, Multipart};

    use super::{super::tests::*, *};

    fn make_service(app: MockApp) -> Service {
        app.admin_service(Router::with_path("admin/products").post(handler))
    }

    fn stored(new: NewProduct) -> ProductRecord {
        ProductRecord {
            uuid: new.uuid,
            category: new.category,
            name: new.name,
            description: new.description,
            price: new.price,
            image_ref: new.image_ref,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[tokio::test]
    async fn test_create_product_success() -> TestResult {
        let soups = CategoryUuid::new();

        let mut app = MockApp::new().with_public_urls().with_catalog(vec![], vec![]);

        app.images
            .expect_upload()
            .once()
            .withf(|bucket, key, _| *bucket == ImageBucket::Products && key.ends_with("_lentil.jpg"))
            .return_once(|_, _, _| Ok(()));

        app.products
            .expect_create_product()
            .once()
            .withf(move |new| {
                new.category == Some(soups)
                    && new.price == Some(Decimal::new(8550, 2))
                    && new.name.get(Locale::De) == "Linsensuppe"
                    && new.description.get(Locale::De).is_empty()
                    && new.image_ref.ends_with("_lentil.jpg")
            })
            .return_once(|new| Ok(stored(new)));

        let form = lentil_form()
            .text("category", &soups.to_string())
            .file("image", "lentil.jpg", b"jpg");

        let mut res = post(form).send(&make_service(app)).await;

        let body: AdminProductResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/admin/products/{}", body.uuid).as_str()));
        assert_eq!(body.price.as_deref(), Some("85.50"));
        assert_eq!(body.category, Some(soups.into_uuid()));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_unparseable_price_is_stored_empty() -> TestResult {
        let mut app = MockApp::new().with_public_urls().with_catalog(vec![], vec![]);

        app.images.expect_upload().once().return_once(|_, _, _| Ok(()));

        app.products
            .expect_create_product()
            .once()
            .withf(|new| new.price.is_none() && new.category.is_none())
            .return_once(|new| Ok(stored(new)));

        let form = Multipart::new()
            .text("name_tr", "Mercimek Çorbası")
            .text("price", "on beş")
            .text("category", "not-a-uuid")
            .file("image", "lentil.jpg", b"jpg");

        let res = post(form).send(&make_service(app)).await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_without_image_returns_400() -> TestResult {
        let mut app = MockApp::new();

        app.images.expect_upload().never();
        app.products.expect_create_product().never();

        let res = post(lentil_form()).send(&make_service(app)).await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_upload_failure_returns_502() -> TestResult {
        let mut app = MockApp::new();

        app.images
            .expect_upload()
            .once()
            .return_once(|_, _, _| Err(ImageStoreError::UnexpectedResponse("500".to_string())));

        app.products.expect_create_product().never();

        let res = post(lentil_form().file("image", "lentil.jpg", b"jpg"))
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_GATEWAY));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_invalid_data_returns_400() -> TestResult {
        let mut app = MockApp::new();

        app.images.expect_upload().once().return_once(|_, _, _| Ok(()));

        app.products
            .expect_create_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::InvalidData));

        let res = post(lentil_form().file("image", "lentil.jpg", b"jpg"))
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
