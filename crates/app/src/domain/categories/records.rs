//! Category Records

use jiff::Timestamp;

use crate::{locales::LocalizedText, uuids::TypedUuid};

/// Category UUID
pub type CategoryUuid = TypedUuid<CategoryRecord>;

/// Category Record
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRecord {
    pub uuid: CategoryUuid,

    /// Display name per locale.
    pub name: LocalizedText,

    /// Object key in the `category-images` bucket. May point at a deleted object.
    pub image_ref: String,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
