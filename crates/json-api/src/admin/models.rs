//! Admin response models, carrying every locale.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use qrmenu_app::{
    domain::{categories::records::CategoryRecord, products::records::ProductRecord},
    images::ImageBucket,
    locales::{Locale, LocalizedText},
};

use crate::state::State;

/// Text per locale
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LocalizedTextResponse {
    pub tr: String,
    pub en: String,
    pub de: String,
    pub ru: String,
}

impl From<&LocalizedText> for LocalizedTextResponse {
    fn from(text: &LocalizedText) -> Self {
        Self {
            tr: text.to_owned_text(Locale::Tr),
            en: text.to_owned_text(Locale::En),
            de: text.to_owned_text(Locale::De),
            ru: text.to_owned_text(Locale::Ru),
        }
    }
}

/// Admin Category Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AdminCategoryResponse {
    pub uuid: Uuid,
    pub name: LocalizedTextResponse,

    /// Stored object key
    pub image_ref: String,

    pub image_url: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Admin Product Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AdminProductResponse {
    pub uuid: Uuid,
    pub category: Option<Uuid>,
    pub name: LocalizedTextResponse,
    pub description: LocalizedTextResponse,
    pub price: Option<String>,

    /// Stored object key
    pub image_ref: String,

    pub image_url: String,
    pub created_at: String,
    pub updated_at: String,
}

impl AdminCategoryResponse {
    pub(crate) fn render(state: &State, category: &CategoryRecord) -> Self {
        Self {
            uuid: category.uuid.into_uuid(),
            name: (&category.name).into(),
            image_ref: category.image_ref.clone(),
            image_url: state
                .app
                .view
                .image_url(ImageBucket::Categories, &category.image_ref),
            created_at: category.created_at.to_string(),
            updated_at: category.updated_at.to_string(),
        }
    }
}

impl AdminProductResponse {
    pub(crate) fn render(state: &State, product: &ProductRecord) -> Self {
        Self {
            uuid: product.uuid.into_uuid(),
            category: product.category.map(|category| category.into_uuid()),
            name: (&product.name).into(),
            description: (&product.description).into(),
            price: product.price.map(|price| price.to_string()),
            image_ref: product.image_ref.clone(),
            image_url: state
                .app
                .view
                .image_url(ImageBucket::Products, &product.image_ref),
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}
