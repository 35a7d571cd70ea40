//! Catalog edit-and-upload workflow.
//!
//! Every submission runs `validate -> upload (when an image was sent) -> write
//! -> refresh`. A failed upload stops before anything is written. A failed
//! write after a successful upload leaves the object behind in storage; the
//! image sweep collects those later.

use std::sync::Arc;

use jiff::Timestamp;
use tracing::{info, warn};

use crate::{
    admin::AdminCapability,
    domain::{
        catalog::{
            CatalogView, CategoryForm, FormToken, ProductForm, SubmissionGuard, ValidationError,
            WorkflowError,
        },
        categories::{
            CategoriesService,
            data::{CategoryUpdate, NewCategory},
            records::{CategoryRecord, CategoryUuid},
        },
        products::{
            ProductsService,
            data::{NewProduct, ProductUpdate},
            records::{ProductRecord, ProductUuid},
        },
    },
    images::{ImageBucket, ImageStore, ImageUpload, image_key},
};

/// Validates, uploads and writes admin edits, then refreshes the view.
#[derive(Clone)]
pub struct CatalogWorkflow {
    categories: Arc<dyn CategoriesService>,
    products: Arc<dyn ProductsService>,
    images: Arc<dyn ImageStore>,
    view: Arc<CatalogView>,
    guard: SubmissionGuard,
}

impl std::fmt::Debug for CatalogWorkflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogWorkflow")
            .field("view", &self.view)
            .field("guard", &self.guard)
            .finish_non_exhaustive()
    }
}

impl CatalogWorkflow {
    #[must_use]
    pub fn new(
        categories: Arc<dyn CategoriesService>,
        products: Arc<dyn ProductsService>,
        images: Arc<dyn ImageStore>,
        view: Arc<CatalogView>,
    ) -> Self {
        Self {
            categories,
            products,
            images,
            view,
            guard: SubmissionGuard::new(),
        }
    }

    /// Registry of form tokens with a submission in flight.
    #[must_use]
    pub fn guard(&self) -> &SubmissionGuard {
        &self.guard
    }

    /// Add a category. The form must carry an image.
    ///
    /// # Errors
    ///
    /// Returns an error when the image is missing, the upload fails, the
    /// insert fails, or `token` belongs to a submission still in flight.
    #[tracing::instrument(
        name = "catalog.add_category",
        skip(self, _admin, form),
        fields(image_ref = tracing::field::Empty),
        err
    )]
    pub async fn add_category(
        &self,
        _admin: &AdminCapability,
        form: CategoryForm,
        token: Option<FormToken>,
    ) -> Result<CategoryRecord, WorkflowError> {
        let _permit = self.guard.acquire(token)?;

        let image = form.image.ok_or(ValidationError::MissingImage)?;
        let image_ref = self.upload(ImageBucket::Categories, image).await?;

        tracing::Span::current().record("image_ref", image_ref.as_str());

        let created = self
            .categories
            .create_category(NewCategory {
                uuid: CategoryUuid::new(),
                name: form.name,
                image_ref: image_ref.clone(),
            })
            .await
            .inspect_err(|_| orphaned(ImageBucket::Categories, &image_ref))?;

        info!(category = %created.uuid, "category added");

        self.refresh_view().await;

        Ok(created)
    }

    /// Overwrite a category's names, and its image when one was sent.
    ///
    /// # Errors
    ///
    /// Returns an error when the upload fails, the update fails, or `token`
    /// belongs to a submission still in flight.
    #[tracing::instrument(
        name = "catalog.update_category",
        skip(self, _admin, form),
        fields(image_ref = tracing::field::Empty),
        err
    )]
    pub async fn update_category(
        &self,
        _admin: &AdminCapability,
        category: CategoryUuid,
        form: CategoryForm,
        token: Option<FormToken>,
    ) -> Result<CategoryRecord, WorkflowError> {
        let _permit = self.guard.acquire(token)?;

        let image_ref = self.upload_optional(ImageBucket::Categories, form.image).await?;

        let updated = self
            .categories
            .update_category(
                category,
                CategoryUpdate {
                    name: form.name,
                    image_ref: image_ref.clone(),
                },
            )
            .await
            .inspect_err(|_| {
                if let Some(image_ref) = &image_ref {
                    orphaned(ImageBucket::Categories, image_ref);
                }
            })?;

        info!(category = %updated.uuid, "category updated");

        self.refresh_view().await;

        Ok(updated)
    }

    /// Delete a category. Its products and its image are left in place.
    ///
    /// # Errors
    ///
    /// Returns an error when the category does not exist or the delete fails.
    #[tracing::instrument(name = "catalog.delete_category", skip(self, _admin), err)]
    pub async fn delete_category(
        &self,
        _admin: &AdminCapability,
        category: CategoryUuid,
    ) -> Result<(), WorkflowError> {
        self.categories.delete_category(category).await?;

        info!(%category, "category deleted");

        self.refresh_view().await;

        Ok(())
    }

    /// Add a product. The form must carry an image.
    ///
    /// # Errors
    ///
    /// Returns an error when the image is missing, the upload fails, the
    /// insert fails, or `token` belongs to a submission still in flight.
    #[tracing::instrument(
        name = "catalog.add_product",
        skip(self, _admin, form),
        fields(image_ref = tracing::field::Empty),
        err
    )]
    pub async fn add_product(
        &self,
        _admin: &AdminCapability,
        form: ProductForm,
        token: Option<FormToken>,
    ) -> Result<ProductRecord, WorkflowError> {
        let _permit = self.guard.acquire(token)?;

        let image = form.image.ok_or(ValidationError::MissingImage)?;
        let image_ref = self.upload(ImageBucket::Products, image).await?;

        tracing::Span::current().record("image_ref", image_ref.as_str());

        let created = self
            .products
            .create_product(NewProduct {
                uuid: ProductUuid::new(),
                category: form.category,
                name: form.name,
                description: form.description,
                price: form.price,
                image_ref: image_ref.clone(),
            })
            .await
            .inspect_err(|_| orphaned(ImageBucket::Products, &image_ref))?;

        info!(product = %created.uuid, "product added");

        self.refresh_view().await;

        Ok(created)
    }

    /// Overwrite a product, replacing its image only when one was sent.
    ///
    /// # Errors
    ///
    /// Returns an error when the upload fails, the update fails, or `token`
    /// belongs to a submission still in flight.
    #[tracing::instrument(
        name = "catalog.update_product",
        skip(self, _admin, form),
        fields(image_ref = tracing::field::Empty),
        err
    )]
    pub async fn update_product(
        &self,
        _admin: &AdminCapability,
        product: ProductUuid,
        form: ProductForm,
        token: Option<FormToken>,
    ) -> Result<ProductRecord, WorkflowError> {
        let _permit = self.guard.acquire(token)?;

        let image_ref = self.upload_optional(ImageBucket::Products, form.image).await?;

        let updated = self
            .products
            .update_product(
                product,
                ProductUpdate {
                    category: form.category,
                    name: form.name,
                    description: form.description,
                    price: form.price,
                    image_ref: image_ref.clone(),
                },
            )
            .await
            .inspect_err(|_| {
                if let Some(image_ref) = &image_ref {
                    orphaned(ImageBucket::Products, image_ref);
                }
            })?;

        info!(product = %updated.uuid, "product updated");

        self.refresh_view().await;

        Ok(updated)
    }

    /// Delete a product. Its image is left in place.
    ///
    /// # Errors
    ///
    /// Returns an error when the product does not exist or the delete fails.
    #[tracing::instrument(name = "catalog.delete_product", skip(self, _admin), err)]
    pub async fn delete_product(
        &self,
        _admin: &AdminCapability,
        product: ProductUuid,
    ) -> Result<(), WorkflowError> {
        self.products.delete_product(product).await?;

        info!(%product, "product deleted");

        self.refresh_view().await;

        Ok(())
    }

    async fn upload(&self, bucket: ImageBucket, image: ImageUpload) -> Result<String, WorkflowError> {
        let key = image_key(Timestamp::now(), &image.filename);

        self.images
            .upload(bucket, &key, image)
            .await
            .map_err(WorkflowError::Upload)?;

        Ok(key)
    }

    async fn upload_optional(
        &self,
        bucket: ImageBucket,
        image: Option<ImageUpload>,
    ) -> Result<Option<String>, WorkflowError> {
        match image {
            Some(image) => self.upload(bucket, image).await.map(Some),
            None => Ok(None),
        }
    }

    /// The write already happened; a failed refresh only leaves the view stale.
    async fn refresh_view(&self) {
        if let Err(error) = self.view.refresh().await {
            warn!(error = %error, "catalog view is stale after a successful write");
        }
    }
}

fn orphaned(bucket: ImageBucket, key: &str) {
    warn!(%bucket, key, "record write failed after upload; image object is orphaned");
}
