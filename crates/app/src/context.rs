//! App Context

use std::sync::Arc;

use jiff::SignedDuration;
use thiserror::Error;

use crate::{
    admin::{AdminGate, AdminPassword, MemoryAdminGate},
    database::{self, DatabaseOptions, Db},
    domain::{
        catalog::{CatalogView, CatalogWorkflow},
        categories::{CategoriesService, PgCategoriesService},
        products::{PgProductsService, ProductsService},
    },
    images::{HttpImageStore, ImageStore, ImageStoreError, StorageConfig},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrations(#[source] sqlx::migrate::MigrateError),

    #[error("invalid storage configuration")]
    Storage(#[source] ImageStoreError),
}

/// Admin gate settings.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub password: AdminPassword,
    pub session_ttl: SignedDuration,
}

#[derive(Clone)]
pub struct AppContext {
    pub categories: Arc<dyn CategoriesService>,
    pub products: Arc<dyn ProductsService>,
    pub images: Arc<dyn ImageStore>,
    pub view: Arc<CatalogView>,
    pub workflow: CatalogWorkflow,
    pub admin: Arc<dyn AdminGate>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("workflow", &self.workflow)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Wire services around already-built store adapters.
    #[must_use]
    pub fn new(
        categories: Arc<dyn CategoriesService>,
        products: Arc<dyn ProductsService>,
        images: Arc<dyn ImageStore>,
        admin: Arc<dyn AdminGate>,
    ) -> Self {
        let view = Arc::new(CatalogView::new(
            Arc::clone(&categories),
            Arc::clone(&products),
            Arc::clone(&images),
        ));

        let workflow = CatalogWorkflow::new(
            Arc::clone(&categories),
            Arc::clone(&products),
            Arc::clone(&images),
            Arc::clone(&view),
        );

        Self {
            categories,
            products,
            images,
            view,
            workflow,
            admin,
        }
    }

    /// Build application context from database, storage and admin settings.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting to or migrating the database fails,
    /// or the storage URL is unusable.
    pub async fn connect(
        database: &DatabaseOptions,
        storage: StorageConfig,
        admin: AdminConfig,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(database)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrations)?;

        let db = Db::new(pool);
        let images = HttpImageStore::new(storage).map_err(AppInitError::Storage)?;

        Ok(Self::new(
            Arc::new(PgCategoriesService::new(db.clone())),
            Arc::new(PgProductsService::new(db)),
            Arc::new(images),
            Arc::new(MemoryAdminGate::new(admin.password, admin.session_ttl)),
        ))
    }
}
