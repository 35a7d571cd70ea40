//! Menu images held in object storage.

use std::fmt;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

mod errors;
mod http;
mod store;

pub use errors::ImageStoreError;
pub use http::{HttpImageStore, StorageConfig};
pub use store::*;

/// Bucket an image object lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageBucket {
    /// `category-images`
    Categories,

    /// `menu-images`
    Products,
}

impl ImageBucket {
    pub const ALL: [Self; 2] = [Self::Categories, Self::Products];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Categories => "category-images",
            Self::Products => "menu-images",
        }
    }
}

impl fmt::Display for ImageBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A file received from an admin form.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Name as sent by the client; may contain a path.
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Object key for an upload: `<epoch-millis>_<basename>`.
///
/// Two uploads of the same file name within one millisecond collide.
#[must_use]
pub fn image_key(uploaded_at: Timestamp, filename: &str) -> String {
    let basename = filename.rsplit(['/', '\\']).next().unwrap_or(filename);

    format!("{}_{basename}", uploaded_at.as_millisecond())
}
