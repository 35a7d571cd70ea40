//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    domain::{
        categories::records::CategoryUuid,
        products::{
            data::{NewProduct, ProductUpdate},
            records::{ProductRecord, ProductUuid},
        },
    },
    locales::{Locale, LocalizedText},
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const LIST_PRODUCTS_IN_CATEGORY_SQL: &str = include_str!("sql/list_products_in_category.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");
const COUNT_PRODUCTS_SQL: &str = include_str!("sql/count_products.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_products_in_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: CategoryUuid,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(LIST_PRODUCTS_IN_CATEGORY_SQL)
            .bind(category.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(product.category.map(CategoryUuid::into_uuid))
            .bind(product.name.to_owned_text(Locale::Tr))
            .bind(product.name.to_owned_text(Locale::En))
            .bind(product.name.to_owned_text(Locale::De))
            .bind(product.name.to_owned_text(Locale::Ru))
            .bind(product.description.to_owned_text(Locale::Tr))
            .bind(product.description.to_owned_text(Locale::En))
            .bind(product.description.to_owned_text(Locale::De))
            .bind(product.description.to_owned_text(Locale::Ru))
            .bind(product.price)
            .bind(product.image_ref)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(UPDATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(update.category.map(CategoryUuid::into_uuid))
            .bind(update.name.to_owned_text(Locale::Tr))
            .bind(update.name.to_owned_text(Locale::En))
            .bind(update.name.to_owned_text(Locale::De))
            .bind(update.name.to_owned_text(Locale::Ru))
            .bind(update.description.to_owned_text(Locale::Tr))
            .bind(update.description.to_owned_text(Locale::En))
            .bind(update.description.to_owned_text(Locale::De))
            .bind(update.description.to_owned_text(Locale::Ru))
            .bind(update.price)
            .bind(update.image_ref)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn count_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<u64, sqlx::Error> {
        let count: i64 = query_scalar(COUNT_PRODUCTS_SQL).fetch_one(&mut **tx).await?;

        u64::try_from(count).map_err(|e| sqlx::Error::ColumnDecode {
            index: "count".to_string(),
            source: Box::new(e),
        })
    }
}

fn localized(row: &PgRow, prefix: &str) -> sqlx::Result<LocalizedText> {
    Locale::ALL
        .into_iter()
        .map(|locale| {
            let column = format!("{prefix}_{}", locale.code());
            row.try_get::<String, _>(column.as_str())
                .map(|text| (locale, text))
        })
        .collect()
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            category: row
                .try_get::<Option<Uuid>, _>("category_uuid")?
                .map(CategoryUuid::from_uuid),
            name: localized(row, "name")?,
            description: localized(row, "description")?,
            price: row.try_get::<Option<Decimal>, _>("price")?,
            image_ref: row.try_get("image_ref")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
