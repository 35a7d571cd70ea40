//! Image store trait.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::images::{ImageBucket, ImageStoreError, ImageUpload};

/// An object found when listing a bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub key: String,
    pub created_at: Option<Timestamp>,
}

#[automock]
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store `image` under `key`. Fails rather than overwriting an existing key.
    async fn upload(
        &self,
        bucket: ImageBucket,
        key: &str,
        image: ImageUpload,
    ) -> Result<(), ImageStoreError>;

    /// Every object in the bucket.
    async fn list(&self, bucket: ImageBucket) -> Result<Vec<StoredImage>, ImageStoreError>;

    /// Delete the given keys; unknown keys are ignored.
    async fn remove(&self, bucket: ImageBucket, keys: Vec<String>) -> Result<(), ImageStoreError>;

    /// Publicly reachable URL of an object.
    fn public_url(&self, bucket: ImageBucket, key: &str) -> String;
}
