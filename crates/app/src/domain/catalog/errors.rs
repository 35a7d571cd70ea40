//! Catalog errors.

use thiserror::Error;

use crate::{
    domain::{categories::CategoriesServiceError, products::ProductsServiceError},
    images::ImageStoreError,
};

/// A submission rejected before anything was uploaded or written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("an image is required when adding a record")]
    MissingImage,
}

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("invalid submission")]
    Validation(#[from] ValidationError),

    #[error("image upload failed")]
    Upload(#[source] ImageStoreError),

    #[error("category write failed")]
    Categories(#[from] CategoriesServiceError),

    #[error("product write failed")]
    Products(#[from] ProductsServiceError),

    /// Another submission of the same form is still running.
    #[error("submission already in flight")]
    InFlight,
}

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("failed to load categories")]
    Categories(#[from] CategoriesServiceError),

    #[error("failed to load products")]
    Products(#[from] ProductsServiceError),
}

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("failed to read image references")]
    Catalog(#[from] ViewError),

    #[error("image store request failed")]
    Images(#[from] ImageStoreError),
}
