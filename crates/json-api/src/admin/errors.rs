//! Admin Errors

use salvo::http::StatusError;
use tracing::error;

use qrmenu_app::{
    admin::AdminGateError,
    domain::{
        catalog::{ValidationError, WorkflowError},
        categories::CategoriesServiceError,
        products::ProductsServiceError,
    },
};

use crate::observability::observe_catalog_change;

/// Record kind a catalog change touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Entity {
    Category,
    Product,
}

/// Kind of catalog change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Change {
    Create,
    Update,
    Delete,
}

impl Entity {
    const fn label(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Product => "product",
        }
    }
}

impl Change {
    const fn label(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    /// Message shown when the record write itself fails.
    const fn failure_brief(self, entity: Entity) -> &'static str {
        match (self, entity) {
            (Self::Create, Entity::Category) => "Kategori eklenirken hata oluştu.",
            (Self::Create, Entity::Product) => "Ürün eklenirken hata oluştu.",
            (Self::Update, _) => "Güncelleme sırasında hata oluştu.",
            (Self::Delete, _) => "Silme işlemi başarısız.",
        }
    }

    const fn upload_brief(self) -> &'static str {
        match self {
            Self::Update => "Yeni görsel yüklenemedi.",
            Self::Create | Self::Delete => "Görsel yüklenemedi.",
        }
    }
}

/// Count the outcome, then map a failure to its HTTP error.
pub(crate) fn observed<T>(
    result: Result<T, WorkflowError>,
    entity: Entity,
    change: Change,
) -> Result<T, StatusError> {
    observe_catalog_change(entity.label(), change.label(), result.is_ok());

    result.map_err(|error| into_status_error(error, entity, change))
}

pub(crate) fn into_status_error(error: WorkflowError, entity: Entity, change: Change) -> StatusError {
    let brief = change.failure_brief(entity);

    match error {
        WorkflowError::Validation(ValidationError::MissingImage) => {
            StatusError::bad_request().brief("Görsel yüklemelisin.")
        }
        WorkflowError::Upload(source) => {
            error!("failed to upload {} image: {source}", entity.label());

            StatusError::bad_gateway().brief(change.upload_brief())
        }
        WorkflowError::InFlight => StatusError::conflict().brief("Bu form zaten gönderiliyor."),
        WorkflowError::Categories(CategoriesServiceError::NotFound)
        | WorkflowError::Products(ProductsServiceError::NotFound) => {
            StatusError::not_found().brief(brief)
        }
        WorkflowError::Categories(CategoriesServiceError::AlreadyExists)
        | WorkflowError::Products(ProductsServiceError::AlreadyExists) => {
            StatusError::conflict().brief(brief)
        }
        WorkflowError::Categories(
            CategoriesServiceError::MissingRequiredData | CategoriesServiceError::InvalidData,
        )
        | WorkflowError::Products(
            ProductsServiceError::MissingRequiredData | ProductsServiceError::InvalidData,
        ) => StatusError::bad_request().brief(brief),
        WorkflowError::Categories(CategoriesServiceError::Sql(source)) => {
            error!("failed to {} category: {source}", change.label());

            StatusError::internal_server_error().brief(brief)
        }
        WorkflowError::Products(ProductsServiceError::Sql(source)) => {
            error!("failed to {} product: {source}", change.label());

            StatusError::internal_server_error().brief(brief)
        }
    }
}

/// Session failures all read as an invalid session to the client.
pub(crate) fn session_error(error: AdminGateError) -> StatusError {
    match error {
        AdminGateError::InvalidPassword => StatusError::unauthorized().brief("Şifre hatalı."),
        AdminGateError::NotFound | AdminGateError::Expired | AdminGateError::Token(_) => {
            StatusError::unauthorized().brief("Oturum geçersiz.")
        }
    }
}
