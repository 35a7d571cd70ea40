//! Categories service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::categories::{
        data::{CategoryUpdate, NewCategory},
        errors::CategoriesServiceError,
        records::{CategoryRecord, CategoryUuid},
        repository::PgCategoriesRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCategoriesService {
    db: Db,
    repository: PgCategoriesRepository,
}

impl PgCategoriesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCategoriesRepository::new(),
        }
    }
}

#[async_trait]
impl CategoriesService for PgCategoriesService {
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let categories = self.repository.list_categories(&mut tx).await?;

        tx.commit().await?;

        Ok(categories)
    }

    async fn get_category(
        &self,
        category: CategoryUuid,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let category = self.repository.get_category(&mut tx, category).await?;

        tx.commit().await?;

        Ok(category)
    }

    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_category(&mut tx, category).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_category(
        &self,
        category: CategoryUuid,
        update: CategoryUpdate,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_category(&mut tx, category, update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_category(&self, category: CategoryUuid) -> Result<(), CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_category(&mut tx, category).await?;

        if rows_affected == 0 {
            return Err(CategoriesServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn count_categories(&self) -> Result<u64, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let count = self.repository.count_categories(&mut tx).await?;

        tx.commit().await?;

        Ok(count)
    }
}

#[automock]
#[async_trait]
pub trait CategoriesService: Send + Sync {
    /// Retrieves all categories.
    async fn list_categories(&self) -> Result<Vec<CategoryRecord>, CategoriesServiceError>;

    /// Retrieve a single category.
    async fn get_category(
        &self,
        category: CategoryUuid,
    ) -> Result<CategoryRecord, CategoriesServiceError>;

    /// Creates a new category.
    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CategoriesServiceError>;

    /// Overwrites the names of a category and, when given, its image reference.
    async fn update_category(
        &self,
        category: CategoryUuid,
        update: CategoryUpdate,
    ) -> Result<CategoryRecord, CategoriesServiceError>;

    /// Deletes a category. Products referencing it are left untouched.
    async fn delete_category(&self, category: CategoryUuid) -> Result<(), CategoriesServiceError>;

    /// Number of stored categories.
    async fn count_categories(&self) -> Result<u64, CategoriesServiceError>;
}
