//! Product Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{domain::categories::records::CategoryUuid, locales::LocalizedText, uuids::TypedUuid};

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,

    /// Owning category. Not enforced: the category may have been deleted.
    pub category: Option<CategoryUuid>,

    pub name: LocalizedText,
    pub description: LocalizedText,

    /// `None` when the submitted price was empty or not a number.
    pub price: Option<Decimal>,

    /// Object key in the `menu-images` bucket.
    pub image_ref: String,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
