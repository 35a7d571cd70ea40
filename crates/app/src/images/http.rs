//! Object storage client for a Supabase-compatible storage REST API.

use std::fmt;

use async_trait::async_trait;
use jiff::Timestamp;
use reqwest::{Client, Response, Url, header::CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use crate::images::{ImageBucket, ImageStore, ImageStoreError, ImageUpload, StoredImage};

const LIST_PAGE_SIZE: usize = 1000;

/// Configuration for connecting to object storage.
#[derive(Clone)]
pub struct StorageConfig {
    /// Storage base URL, e.g. `"https://project.supabase.co"`.
    pub url: String,

    /// Service key sent as bearer token and `apikey`.
    pub service_key: String,

    /// Base URL for public object links; defaults to `url`.
    pub public_url: Option<String>,
}

impl fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageConfig")
            .field("url", &self.url)
            .field("service_key", &"**redacted**")
            .field("public_url", &self.public_url)
            .finish()
    }
}

/// HTTP client for image uploads.
#[derive(Debug, Clone)]
pub struct HttpImageStore {
    base: Url,
    public_base: Url,
    service_key: String,
    http: Client,
}

impl HttpImageStore {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when either base URL cannot be parsed.
    pub fn new(config: StorageConfig) -> Result<Self, ImageStoreError> {
        let base = parse_base(&config.url)?;
        let public_base = match config.public_url.as_deref() {
            Some(public_url) => parse_base(public_url)?,
            None => base.clone(),
        };

        Ok(Self {
            base,
            public_base,
            service_key: config.service_key,
            http: Client::new(),
        })
    }

    fn endpoint(&self, base: &Url, segments: &[&str]) -> Result<Url, ImageStoreError> {
        let mut url = base.clone();

        url.path_segments_mut()
            .map_err(|()| ImageStoreError::InvalidUrl(base.to_string()))?
            .pop_if_empty()
            .extend(["storage", "v1", "object"])
            .extend(segments);

        Ok(url)
    }

    async fn check(response: Response, action: &str) -> Result<Response, ImageStoreError> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        Err(ImageStoreError::UnexpectedResponse(format!(
            "{action} request failed with status {status}: {text}"
        )))
    }
}

fn parse_base(url: &str) -> Result<Url, ImageStoreError> {
    let parsed = Url::parse(url).map_err(|e| ImageStoreError::InvalidUrl(format!("{url}: {e}")))?;

    if parsed.cannot_be_a_base() {
        return Err(ImageStoreError::InvalidUrl(url.to_string()));
    }

    Ok(parsed)
}

#[async_trait]
impl ImageStore for HttpImageStore {
    #[tracing::instrument(
        name = "images.upload",
        skip(self, image),
        fields(bucket = %bucket, len = image.bytes.len()),
        err
    )]
    async fn upload(
        &self,
        bucket: ImageBucket,
        key: &str,
        image: ImageUpload,
    ) -> Result<(), ImageStoreError> {
        let url = self.endpoint(&self.base, &[bucket.name(), key])?;

        let content_type = image
            .content_type
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .header(CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(image.bytes)
            .send()
            .await?;

        Self::check(response, "upload").await?;

        Ok(())
    }

    #[tracing::instrument(name = "images.list", skip(self), fields(bucket = %bucket), err)]
    async fn list(&self, bucket: ImageBucket) -> Result<Vec<StoredImage>, ImageStoreError> {
        let url = self.endpoint(&self.base, &["list", bucket.name()])?;
        let mut images = Vec::new();
        let mut offset = 0;

        loop {
            let response = self
                .http
                .post(url.clone())
                .bearer_auth(&self.service_key)
                .header("apikey", &self.service_key)
                .json(&ListRequest {
                    prefix: "",
                    limit: LIST_PAGE_SIZE,
                    offset,
                })
                .send()
                .await?;

            let page: Vec<ListedObject> = Self::check(response, "list").await?.json().await?;
            let page_len = page.len();

            images.extend(page.into_iter().filter(|o| o.id.is_some()).map(|o| {
                StoredImage {
                    key: o.name,
                    created_at: o.created_at,
                }
            }));

            if page_len < LIST_PAGE_SIZE {
                return Ok(images);
            }

            offset += page_len;
        }
    }

    #[tracing::instrument(
        name = "images.remove",
        skip(self, keys),
        fields(bucket = %bucket, count = keys.len()),
        err
    )]
    async fn remove(&self, bucket: ImageBucket, keys: Vec<String>) -> Result<(), ImageStoreError> {
        if keys.is_empty() {
            return Ok(());
        }

        let url = self.endpoint(&self.base, &[bucket.name()])?;

        let response = self
            .http
            .delete(url)
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .json(&RemoveRequest { prefixes: keys })
            .send()
            .await?;

        Self::check(response, "remove").await?;

        Ok(())
    }

    fn public_url(&self, bucket: ImageBucket, key: &str) -> String {
        match self.endpoint(&self.public_base, &["public", bucket.name(), key]) {
            Ok(url) => url.to_string(),
            Err(_) => format!(
                "{}/storage/v1/object/public/{}/{key}",
                self.public_base.as_str().trim_end_matches('/'),
                bucket.name()
            ),
        }
    }
}

#[derive(Debug, Serialize)]
struct ListRequest<'a> {
    prefix: &'a str,
    limit: usize,
    offset: usize,
}

#[derive(Debug, Deserialize)]
struct ListedObject {
    name: String,

    /// Absent for folder placeholders.
    id: Option<String>,

    created_at: Option<Timestamp>,
}

#[derive(Debug, Serialize)]
struct RemoveRequest {
    prefixes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn store(public_url: Option<&str>) -> Result<HttpImageStore, ImageStoreError> {
        HttpImageStore::new(StorageConfig {
            url: "https://menu.supabase.co".to_string(),
            service_key: "service-key".to_string(),
            public_url: public_url.map(str::to_string),
        })
    }

    #[test]
    fn public_url_points_at_public_object_path() -> TestResult {
        let store = store(None)?;

        assert_eq!(
            store.public_url(ImageBucket::Products, "1714000000000_soup.png"),
            "https://menu.supabase.co/storage/v1/object/public/menu-images/1714000000000_soup.png"
        );

        Ok(())
    }

    #[test]
    fn public_url_uses_configured_public_base() -> TestResult {
        let store = store(Some("https://cdn.example.com/"))?;

        assert_eq!(
            store.public_url(ImageBucket::Categories, "1_a.jpg"),
            "https://cdn.example.com/storage/v1/object/public/category-images/1_a.jpg"
        );

        Ok(())
    }

    #[test]
    fn public_url_escapes_file_names() -> TestResult {
        let store = store(None)?;

        assert_eq!(
            store.public_url(ImageBucket::Products, "1_mercimek çorbası.png"),
            "https://menu.supabase.co/storage/v1/object/public/menu-images/1_mercimek%20%C3%A7orbas%C4%B1.png"
        );

        Ok(())
    }

    #[test]
    fn new_rejects_unusable_urls() {
        let result = HttpImageStore::new(StorageConfig {
            url: "mailto:chef@example.com".to_string(),
            service_key: String::new(),
            public_url: None,
        });

        assert!(
            matches!(result, Err(ImageStoreError::InvalidUrl(_))),
            "expected InvalidUrl, got {result:?}"
        );
    }

    #[test]
    fn config_debug_redacts_service_key() {
        let config = StorageConfig {
            url: "https://menu.supabase.co".to_string(),
            service_key: "very-secret".to_string(),
            public_url: None,
        };

        assert!(!format!("{config:?}").contains("very-secret"));
    }
}
