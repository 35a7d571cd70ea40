//! Catalog View
//!
//! An in-memory copy of every category and product, replaced wholesale on
//! each refresh. Public browsing and the admin lists read from it.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use jiff::Timestamp;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use crate::{
    domain::{
        catalog::ViewError,
        categories::{CategoriesService, records::{CategoryRecord, CategoryUuid}},
        products::{ProductsService, records::ProductRecord},
    },
    images::{ImageBucket, ImageStore},
    locales::{Locale, LocalizedText},
};

/// Records that carry a localized display name.
pub trait Named {
    /// Name in every locale.
    fn name(&self) -> &LocalizedText;
}

impl Named for CategoryRecord {
    fn name(&self) -> &LocalizedText {
        &self.name
    }
}

impl Named for ProductRecord {
    fn name(&self) -> &LocalizedText {
        &self.name
    }
}

/// One consistent read of the catalog.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    /// Every category, in store order.
    pub categories: Vec<CategoryRecord>,

    /// Every product, including those whose category is gone.
    pub products: Vec<ProductRecord>,

    /// `None` until the first successful refresh.
    pub loaded_at: Option<Timestamp>,
}

/// Shared read model of the catalog, re-synced after every edit.
pub struct CatalogView {
    categories: Arc<dyn CategoriesService>,
    products: Arc<dyn ProductsService>,
    images: Arc<dyn ImageStore>,
    snapshot: RwLock<Arc<CatalogSnapshot>>,

    // Held across read and swap so a slower, older refresh never lands last.
    refreshing: Mutex<()>,

    // Set by a failed refresh; the next `loaded` re-reads.
    stale: AtomicBool,
}

impl std::fmt::Debug for CatalogView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogView").finish_non_exhaustive()
    }
}

impl CatalogView {
    #[must_use]
    pub fn new(
        categories: Arc<dyn CategoriesService>,
        products: Arc<dyn ProductsService>,
        images: Arc<dyn ImageStore>,
    ) -> Self {
        Self {
            categories,
            products,
            images,
            snapshot: RwLock::new(Arc::new(CatalogSnapshot::default())),
            refreshing: Mutex::new(()),
            stale: AtomicBool::new(false),
        }
    }

    /// Re-read both lists from the store and swap them in.
    ///
    /// Refreshes run one at a time, so the installed snapshot was read no
    /// earlier than any refresh that completed before it.
    ///
    /// # Errors
    ///
    /// Returns an error when either list cannot be read; the previous snapshot
    /// stays in place and is marked stale.
    #[tracing::instrument(name = "catalog.refresh", skip(self), err)]
    pub async fn refresh(&self) -> Result<Arc<CatalogSnapshot>, ViewError> {
        let _serial = self.refreshing.lock().await;

        let loaded = tokio::try_join!(
            async { self.categories.list_categories().await.map_err(ViewError::from) },
            async { self.products.list_products().await.map_err(ViewError::from) },
        );

        let (categories, products) = match loaded {
            Ok(lists) => lists,
            Err(error) => {
                self.stale.store(true, Ordering::SeqCst);
                warn!(error = %error, "catalog refresh failed; keeping previous snapshot");
                return Err(error);
            }
        };

        info!(
            categories = categories.len(),
            products = products.len(),
            "catalog refreshed"
        );

        let fresh = Arc::new(CatalogSnapshot {
            categories,
            products,
            loaded_at: Some(Timestamp::now()),
        });

        *self.snapshot.write().await = Arc::clone(&fresh);
        self.stale.store(false, Ordering::SeqCst);

        Ok(fresh)
    }

    /// Current snapshot, without touching the store.
    pub async fn snapshot(&self) -> Arc<CatalogSnapshot> {
        Arc::clone(&*self.snapshot.read().await)
    }

    /// Current snapshot, loading it first if nothing has been loaded yet or
    /// the last refresh failed.
    ///
    /// # Errors
    ///
    /// Returns an error when that load fails.
    pub async fn loaded(&self) -> Result<Arc<CatalogSnapshot>, ViewError> {
        let snapshot = self.snapshot().await;

        if snapshot.loaded_at.is_some() && !self.stale.load(Ordering::SeqCst) {
            return Ok(snapshot);
        }

        self.refresh().await
    }

    /// Public URL of a stored image.
    #[must_use]
    pub fn image_url(&self, bucket: ImageBucket, image_ref: &str) -> String {
        self.images.public_url(bucket, image_ref)
    }
}

/// Text for the raw `lang` value; unknown values read the default locale.
#[must_use]
pub fn pick<'a>(text: &'a LocalizedText, lang: &str) -> &'a str {
    text.pick(lang)
}

/// Records whose name in `locale` contains `term`, ignoring case.
///
/// An empty term keeps every record.
#[must_use]
pub fn search<'a, T: Named>(records: &'a [T], term: &str, locale: Locale) -> Vec<&'a T> {
    let needle = fold_case(term);

    records
        .iter()
        .filter(|record| {
            needle.is_empty() || fold_case(record.name().get(locale)).contains(&needle)
        })
        .collect()
}

/// Lowercase with the Turkish dotted and dotless i collapsed onto `i`, so
/// `BALIK` finds `Balık` and `İZGARA` finds `ızgara`.
fn fold_case(text: &str) -> String {
    text.chars()
        .flat_map(|c| match c {
            'ı' | 'İ' => 'i'.to_lowercase(),
            other => other.to_lowercase(),
        })
        .collect()
}

/// Products whose category reference equals `category`, dangling or not.
#[must_use]
pub fn products_in_category<'a, P>(products: P, category: CategoryUuid) -> Vec<&'a ProductRecord>
where
    P: IntoIterator<Item = &'a ProductRecord>,
{
    products
        .into_iter()
        .filter(|product| product.category == Some(category))
        .collect()
}
