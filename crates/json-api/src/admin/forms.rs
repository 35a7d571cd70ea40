//! Multipart admin forms.
//!
//! Text fields are `name_<lang>`, `description_<lang>`, `price` and
//! `category`; the image arrives as the `image` file part. Missing text
//! fields read as empty.

use salvo::{
    Request,
    http::{StatusError, form::FormData},
};
use tracing::warn;

use qrmenu_app::{
    domain::catalog::{
        CategoryForm, FormToken, ProductForm,
        forms::{parse_category, parse_price},
    },
    images::ImageUpload,
    locales::{Locale, LocalizedText},
};

use crate::extensions::*;

/// Header naming the form instance a submission belongs to.
pub(crate) const FORM_TOKEN_HEADER: &str = "x-form-token";

const IMAGE_FIELD: &str = "image";

pub(crate) fn form_token(req: &Request) -> Option<FormToken> {
    req.header::<String>(FORM_TOKEN_HEADER)
        .and_then(|value| FormToken::new(&value))
}

pub(crate) async fn category_form(req: &mut Request) -> Result<CategoryForm, StatusError> {
    let form = form_data(req).await?;

    Ok(CategoryForm {
        name: localized(form, "name"),
        image: image(form).await?,
    })
}

pub(crate) async fn product_form(req: &mut Request) -> Result<ProductForm, StatusError> {
    let form = form_data(req).await?;

    Ok(ProductForm {
        name: localized(form, "name"),
        description: localized(form, "description"),
        price: parse_price(text(form, "price")),
        category: parse_category(text(form, "category")),
        image: image(form).await?,
    })
}

async fn form_data(req: &mut Request) -> Result<&FormData, StatusError> {
    req.form_data().await.map_err(|error| {
        warn!("failed to parse admin form: {error}");

        StatusError::bad_request().brief("Form okunamadı.")
    })
}

fn text<'a>(form: &'a FormData, field: &str) -> &'a str {
    form.fields.get(field).map_or("", String::as_str)
}

fn localized(form: &FormData, prefix: &str) -> LocalizedText {
    Locale::ALL
        .into_iter()
        .map(|locale| {
            let field = format!("{prefix}_{}", locale.code());

            (locale, text(form, &field).to_string())
        })
        .collect()
}

/// The `image` part, or `None` when the browser sent an empty file input.
async fn image(form: &FormData) -> Result<Option<ImageUpload>, StatusError> {
    let Some(file) = form.files.get(IMAGE_FIELD) else {
        return Ok(None);
    };

    let filename = file.name().unwrap_or_default();

    if filename.is_empty() && file.size() == 0 {
        return Ok(None);
    }

    let bytes = tokio::fs::read(file.path())
        .await
        .or_500("failed to read uploaded image")?;

    Ok(Some(ImageUpload {
        filename: filename.to_string(),
        content_type: file.content_type().map(|mime| mime.to_string()),
        bytes,
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex, PoisonError};

    use rust_decimal::Decimal;
    use salvo::{
        affix_state::inject,
        http::header::{CONTENT_TYPE, HeaderValue},
        prelude::*,
        test::TestClient,
    };
    use testresult::TestResult;

    use qrmenu_app::domain::categories::records::CategoryUuid;

    use crate::test_helpers::Multipart;

    use super::*;

    type Captured = Arc<Mutex<Option<ProductForm>>>;

    #[salvo::handler]
    async fn capture(req: &mut Request, depot: &mut Depot, res: &mut Response) {
        let form = match product_form(req).await {
            Ok(form) => form,
            Err(error) => {
                res.render(error);
                return;
            }
        };

        if let Ok(captured) = depot.obtain::<Captured>() {
            *captured.lock().unwrap_or_else(PoisonError::into_inner) = Some(form);
        }

        res.status_code(StatusCode::OK);
    }

    fn make_service(captured: &Captured) -> Service {
        Service::new(
            Router::with_path("form")
                .hoop(inject(Arc::clone(captured)))
                .post(capture),
        )
    }

    async fn submit(body: Vec<u8>) -> (Option<StatusCode>, Option<ProductForm>) {
        let captured = Captured::default();

        let res = TestClient::post("http://example.com/form")
            .add_header(CONTENT_TYPE, Multipart::content_type(), true)
            .body(body)
            .send(&make_service(&captured))
            .await;

        let form = captured.lock().unwrap_or_else(PoisonError::into_inner).take();

        (res.status_code, form)
    }

    #[tokio::test]
    async fn test_product_form_reads_every_field() -> TestResult {
        let category = CategoryUuid::new();

        let body = Multipart::new()
            .text("name_tr", "Mercimek Çorbası")
            .text("name_en", "Lentil Soup")
            .text("description_de", "Linsensuppe")
            .text("price", "85,50")
            .text("category", &category.to_string())
            .file("image", "soup.png", b"\x89PNG")
            .finish();

        let (status, form) = submit(body).await;
        let form = form.ok_or("form was not captured")?;
        let image = form.image.ok_or("image was not captured")?;

        assert_eq!(status, Some(StatusCode::OK));
        assert_eq!(form.name.get(Locale::Tr), "Mercimek Çorbası");
        assert_eq!(form.name.get(Locale::Ru), "");
        assert_eq!(form.description.get(Locale::De), "Linsensuppe");
        assert_eq!(form.price, Some(Decimal::new(8550, 2)));
        assert_eq!(form.category, Some(category));
        assert_eq!(image.bytes, b"\x89PNG");
        assert_eq!(image.filename, "soup.png");
        assert_eq!(image.content_type.as_deref(), Some("image/png"));

        Ok(())
    }

    #[tokio::test]
    async fn test_product_form_tolerates_bad_price_and_category() -> TestResult {
        let body = Multipart::new()
            .text("name_tr", "Ayran")
            .text("price", "bedava")
            .text("category", "")
            .finish();

        let (_, form) = submit(body).await;
        let form = form.ok_or("form was not captured")?;

        assert_eq!(form.price, None);
        assert_eq!(form.category, None);
        assert!(form.image.is_none(), "no image part was sent");

        Ok(())
    }

    #[tokio::test]
    async fn test_non_multipart_body_is_rejected() -> TestResult {
        let captured = Captured::default();

        let res = TestClient::post("http://example.com/form")
            .add_header(CONTENT_TYPE, "application/json", true)
            .body("{}")
            .send(&make_service(&captured))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[test]
    fn blank_form_token_is_ignored() {
        let mut req = Request::new();

        req.headers_mut()
            .insert(FORM_TOKEN_HEADER, HeaderValue::from_static("  "));

        assert!(form_token(&req).is_none(), "blank token should not claim a slot");
    }

    #[test]
    fn form_token_is_read_from_header() {
        let mut req = Request::new();

        req.headers_mut()
            .insert(FORM_TOKEN_HEADER, HeaderValue::from_static("add-product-1"));

        assert_eq!(
            form_token(&req).as_ref().map(FormToken::as_str),
            Some("add-product-1")
        );
    }
}
