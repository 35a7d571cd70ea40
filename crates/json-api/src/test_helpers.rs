//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use qrmenu_app::{
    admin::{AdminCapability, MockAdminGate},
    context::AppContext,
    domain::{
        categories::{
            MockCategoriesService,
            records::{CategoryRecord, CategoryUuid},
        },
        products::{
            MockProductsService,
            records::{ProductRecord, ProductUuid},
        },
    },
    images::MockImageStore,
    locales::{Locale, LocalizedText},
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_ADMIN: AdminCapability = AdminCapability::new(Uuid::nil());

pub(crate) const MULTIPART_BOUNDARY: &str = "qrmenu-test-boundary";

#[salvo::handler]
pub(crate) async fn inject_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_admin(TEST_ADMIN);
    ctrl.call_next(req, depot, res).await;
}

/// Mocked collaborators behind one [`AppContext`].
///
/// A mock without expectations panics when called, so every test spells out
/// exactly which store calls its handler makes.
#[derive(Default)]
pub(crate) struct MockApp {
    pub(crate) categories: MockCategoriesService,
    pub(crate) products: MockProductsService,
    pub(crate) images: MockImageStore,
    pub(crate) admin: MockAdminGate,
}

impl MockApp {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Serve stable public URLs: `https://cdn.test/<bucket>/<key>`.
    pub(crate) fn with_public_urls(mut self) -> Self {
        self.images
            .expect_public_url()
            .returning(|bucket, key| format!("https://cdn.test/{bucket}/{key}"));

        self
    }

    /// Answer view refreshes with the given lists, any number of times.
    pub(crate) fn with_catalog(
        mut self,
        categories: Vec<CategoryRecord>,
        products: Vec<ProductRecord>,
    ) -> Self {
        self.categories
            .expect_list_categories()
            .returning(move || Ok(categories.clone()));

        self.products
            .expect_list_products()
            .returning(move || Ok(products.clone()));

        self
    }

    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext::new(
            Arc::new(self.categories),
            Arc::new(self.products),
            Arc::new(self.images),
            Arc::new(self.admin),
        ))
    }

    /// Routes with the state injected but no admin session.
    pub(crate) fn public_service(self, route: Router) -> Service {
        Service::new(Router::new().hoop(inject(self.into_state())).push(route))
    }

    /// Routes running as an already authenticated admin.
    pub(crate) fn admin_service(self, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.into_state()))
                .hoop(inject_admin)
                .push(route),
        )
    }
}

pub(crate) fn localized(tr: &str, en: &str) -> LocalizedText {
    LocalizedText::new()
        .with(Locale::Tr, tr)
        .with(Locale::En, en)
        .with(Locale::De, "")
        .with(Locale::Ru, "")
}

pub(crate) fn make_category(uuid: CategoryUuid, tr: &str, en: &str) -> CategoryRecord {
    CategoryRecord {
        uuid,
        name: localized(tr, en),
        image_ref: format!("1700000000000_{en}.png").to_lowercase(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_product(
    uuid: ProductUuid,
    category: Option<CategoryUuid>,
    tr: &str,
    en: &str,
    price: Option<Decimal>,
) -> ProductRecord {
    ProductRecord {
        uuid,
        category,
        name: localized(tr, en),
        description: localized(&format!("{tr} açıklaması"), &format!("{en} description")),
        price,
        image_ref: format!("1700000000000_{en}.png").to_lowercase(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// Hand-rolled `multipart/form-data` body.
#[derive(Debug, Default)]
pub(crate) struct Multipart {
    body: Vec<u8>,
}

impl Multipart {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );

        self
    }

    pub(crate) fn file(mut self, name: &str, filename: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");

        self
    }

    pub(crate) fn content_type() -> String {
        format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}")
    }

    pub(crate) fn finish(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

        self.body
    }
}
