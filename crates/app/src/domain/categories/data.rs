//! Category Data

use crate::{domain::categories::records::CategoryUuid, locales::LocalizedText};

/// New Category Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub uuid: CategoryUuid,
    pub name: LocalizedText,
    pub image_ref: String,
}

/// Category Update Data
///
/// Names are always overwritten; the image is only replaced when present.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryUpdate {
    pub name: LocalizedText,
    pub image_ref: Option<String>,
}
