//! Categories Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    domain::categories::{
        data::{CategoryUpdate, NewCategory},
        records::{CategoryRecord, CategoryUuid},
    },
    locales::{Locale, LocalizedText},
};

const LIST_CATEGORIES_SQL: &str = include_str!("sql/list_categories.sql");
const GET_CATEGORY_SQL: &str = include_str!("sql/get_category.sql");
const CREATE_CATEGORY_SQL: &str = include_str!("sql/create_category.sql");
const UPDATE_CATEGORY_SQL: &str = include_str!("sql/update_category.sql");
const DELETE_CATEGORY_SQL: &str = include_str!("sql/delete_category.sql");
const COUNT_CATEGORIES_SQL: &str = include_str!("sql/count_categories.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCategoriesRepository;

impl PgCategoriesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_categories(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<CategoryRecord>, sqlx::Error> {
        query_as::<Postgres, CategoryRecord>(LIST_CATEGORIES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: CategoryUuid,
    ) -> Result<CategoryRecord, sqlx::Error> {
        query_as::<Postgres, CategoryRecord>(GET_CATEGORY_SQL)
            .bind(category.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: NewCategory,
    ) -> Result<CategoryRecord, sqlx::Error> {
        query_as::<Postgres, CategoryRecord>(CREATE_CATEGORY_SQL)
            .bind(category.uuid.into_uuid())
            .bind(category.name.to_owned_text(Locale::Tr))
            .bind(category.name.to_owned_text(Locale::En))
            .bind(category.name.to_owned_text(Locale::De))
            .bind(category.name.to_owned_text(Locale::Ru))
            .bind(category.image_ref)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: CategoryUuid,
        update: CategoryUpdate,
    ) -> Result<CategoryRecord, sqlx::Error> {
        query_as::<Postgres, CategoryRecord>(UPDATE_CATEGORY_SQL)
            .bind(category.into_uuid())
            .bind(update.name.to_owned_text(Locale::Tr))
            .bind(update.name.to_owned_text(Locale::En))
            .bind(update.name.to_owned_text(Locale::De))
            .bind(update.name.to_owned_text(Locale::Ru))
            .bind(update.image_ref)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: CategoryUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CATEGORY_SQL)
            .bind(category.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn count_categories(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<u64, sqlx::Error> {
        let count: i64 = query_scalar(COUNT_CATEGORIES_SQL)
            .fetch_one(&mut **tx)
            .await?;

        u64::try_from(count).map_err(|e| sqlx::Error::ColumnDecode {
            index: "count".to_string(),
            source: Box::new(e),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CategoryRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let name = LocalizedText::new()
            .with(Locale::Tr, row.try_get::<String, _>("name_tr")?)
            .with(Locale::En, row.try_get::<String, _>("name_en")?)
            .with(Locale::De, row.try_get::<String, _>("name_de")?)
            .with(Locale::Ru, row.try_get::<String, _>("name_ru")?);

        Ok(Self {
            uuid: CategoryUuid::from_uuid(row.try_get("uuid")?),
            name,
            image_ref: row.try_get("image_ref")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
