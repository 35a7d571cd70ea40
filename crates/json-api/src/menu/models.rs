//! Menu response models, rendered in a single locale.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use qrmenu_app::{
    domain::{categories::records::CategoryRecord, products::records::ProductRecord},
    images::ImageBucket,
    locales::Locale,
};

use crate::state::State;

/// Category tile
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MenuCategoryResponse {
    pub uuid: Uuid,
    pub name: String,
    pub image_url: String,
}

/// Product card
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MenuProductResponse {
    pub uuid: Uuid,
    pub category: Option<Uuid>,
    pub name: String,
    pub description: String,

    /// Decimal price as text; absent when the product has none
    pub price: Option<String>,

    pub image_url: String,
}

impl MenuCategoryResponse {
    pub(crate) fn render(state: &State, category: &CategoryRecord, locale: Locale) -> Self {
        Self {
            uuid: category.uuid.into_uuid(),
            name: category.name.get(locale).to_string(),
            image_url: state
                .app
                .view
                .image_url(ImageBucket::Categories, &category.image_ref),
        }
    }
}

impl MenuProductResponse {
    pub(crate) fn render(state: &State, product: &ProductRecord, locale: Locale) -> Self {
        Self {
            uuid: product.uuid.into_uuid(),
            category: product.category.map(|category| category.into_uuid()),
            name: product.name.get(locale).to_string(),
            description: product.description.get(locale).to_string(),
            price: product.price.map(|price| price.to_string()),
            image_url: state
                .app
                .view
                .image_url(ImageBucket::Products, &product.image_ref),
        }
    }
}
