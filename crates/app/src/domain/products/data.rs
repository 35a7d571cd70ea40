//! Products Data

use rust_decimal::Decimal;

use crate::{
    domain::{categories::records::CategoryUuid, products::records::ProductUuid},
    locales::LocalizedText,
};

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub category: Option<CategoryUuid>,
    pub name: LocalizedText,
    pub description: LocalizedText,
    pub price: Option<Decimal>,
    pub image_ref: String,
}

/// Product Update Data
///
/// Every field except the image is overwritten.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub category: Option<CategoryUuid>,
    pub name: LocalizedText,
    pub description: LocalizedText,
    pub price: Option<Decimal>,
    pub image_ref: Option<String>,
}
