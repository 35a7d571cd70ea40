//! Admin form submissions.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::{
    domain::categories::records::CategoryUuid, images::ImageUpload, locales::LocalizedText,
};

/// Category add/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryForm {
    pub name: LocalizedText,

    /// Required when adding; `None` keeps the current image on update.
    pub image: Option<ImageUpload>,
}

/// Product add/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub name: LocalizedText,
    pub description: LocalizedText,
    pub price: Option<Decimal>,
    pub category: Option<CategoryUuid>,

    /// Required when adding; `None` keeps the current image on update.
    pub image: Option<ImageUpload>,
}

/// Lenient price parsing: anything that is not a decimal number means "no price".
///
/// A comma is accepted as the decimal separator. Negative prices are kept.
#[must_use]
pub fn parse_price(text: &str) -> Option<Decimal> {
    let text = text.trim();

    if text.is_empty() {
        return None;
    }

    Decimal::from_str(&text.replace(',', ".")).ok()
}

/// An empty or malformed category selection means "no category".
#[must_use]
pub fn parse_category(text: &str) -> Option<CategoryUuid> {
    text.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_price_accepts_decimals() {
        assert_eq!(parse_price("85.50"), Some(Decimal::new(8550, 2)));
        assert_eq!(parse_price(" 120 "), Some(Decimal::new(120, 0)));
        assert_eq!(parse_price("12,5"), Some(Decimal::new(125, 1)));
    }

    #[test]
    fn parse_price_keeps_negative_values() {
        assert_eq!(parse_price("-5"), Some(Decimal::new(-5, 0)));
    }

    #[test]
    fn parse_price_without_a_number_is_none() {
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("   "), None);
        assert_eq!(parse_price("ücretsiz"), None);
    }

    #[test]
    fn parse_category_empty_is_none() {
        assert_eq!(parse_category(""), None);
        assert_eq!(parse_category("not-a-uuid"), None);
    }

    #[test]
    fn parse_category_reads_uuid() {
        let category = CategoryUuid::new();

        assert_eq!(parse_category(&category.to_string()), Some(category));
    }
}
