//! Orphaned image sweep.
//!
//! Uploads happen before the record write, so a failed write leaves an object
//! nobody references. Deleting or re-imaging a record does the same. The sweep
//! removes such objects once they are older than a grace period; the grace
//! period keeps it away from uploads whose write is still in progress.

use std::sync::Arc;

use jiff::{SignedDuration, Timestamp};
use rustc_hash::FxHashSet;
use tracing::info;

use crate::{
    domain::{
        catalog::{ReconcileError, ViewError},
        categories::CategoriesService,
        products::ProductsService,
    },
    images::{ImageBucket, ImageStore},
};

/// Outcome for one bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketSweep {
    /// Bucket that was listed.
    pub bucket: ImageBucket,

    /// Objects found in the bucket.
    pub scanned: usize,

    /// Objects some category or product still points at.
    pub referenced: usize,

    /// Unreferenced but inside the grace period, or of unknown age.
    pub recent: usize,

    /// Removed, or that would be removed on a dry run.
    pub removed: Vec<String>,
}

/// Outcome of one sweep over both image buckets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepReport {
    /// Nothing was removed.
    pub dry_run: bool,

    /// Category images first, then product images.
    pub buckets: Vec<BucketSweep>,
}

/// Removes stored images that no category or product references.
pub struct ImageReconciler {
    categories: Arc<dyn CategoriesService>,
    products: Arc<dyn ProductsService>,
    images: Arc<dyn ImageStore>,
}

impl std::fmt::Debug for ImageReconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageReconciler").finish_non_exhaustive()
    }
}

impl ImageReconciler {
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
        }
    }

    /// Remove unreferenced images older than `grace`.
    ///
    /// # Errors
    ///
    /// Returns an error when the catalog or a bucket cannot be read, or a
    /// removal fails.
    pub async fn sweep(
        &self,
        grace: SignedDuration,
        dry_run: bool,
    ) -> Result<SweepReport, ReconcileError> {
        self.sweep_at(Timestamp::now(), grace, dry_run).await
    }

    #[tracing::instrument(name = "images.sweep", skip(self), err)]
    async fn sweep_at(
        &self,
        now: Timestamp,
        grace: SignedDuration,
        dry_run: bool,
    ) -> Result<SweepReport, ReconcileError> {
        let (categories, products) = tokio::try_join!(
            async { self.categories.list_categories().await.map_err(ViewError::from) },
            async { self.products.list_products().await.map_err(ViewError::from) },
        )?;

        let cutoff = now - grace;
        let mut buckets = Vec::with_capacity(ImageBucket::ALL.len());

        for bucket in ImageBucket::ALL {
            let referenced: FxHashSet<&str> = match bucket {
                ImageBucket::Categories => categories.iter().map(|c| c.image_ref.as_str()).collect(),
                ImageBucket::Products => products.iter().map(|p| p.image_ref.as_str()).collect(),
            };

            let stored = self.images.list(bucket).await?;

            let mut sweep = BucketSweep {
                bucket,
                scanned: stored.len(),
                referenced: 0,
                recent: 0,
                removed: Vec::new(),
            };

            for image in stored {
                if referenced.contains(image.key.as_str()) {
                    sweep.referenced += 1;
                } else if image.created_at.is_some_and(|created_at| created_at <= cutoff) {
                    sweep.removed.push(image.key);
                } else {
                    sweep.recent += 1;
                }
            }

            if !dry_run {
                self.images.remove(bucket, sweep.removed.clone()).await?;
            }

            info!(
                %bucket,
                scanned = sweep.scanned,
                referenced = sweep.referenced,
                recent = sweep.recent,
                removed = sweep.removed.len(),
                dry_run,
                "image bucket swept"
            );

            buckets.push(sweep);
        }

        Ok(SweepReport { dry_run, buckets })
    }
}
