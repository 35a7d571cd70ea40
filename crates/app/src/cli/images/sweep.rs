use std::sync::Arc;

use clap::Args;
use jiff::SignedDuration;
use qrmenu_app::{
    database::{self, DatabaseOptions, Db},
    domain::{
        catalog::ImageReconciler, categories::PgCategoriesService, products::PgProductsService,
    },
    images::{HttpImageStore, StorageConfig},
};

#[derive(Debug, Args)]
pub(crate) struct SweepArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Object storage base URL
    #[arg(long, env = "STORAGE_URL")]
    storage_url: String,

    /// Object storage service key
    #[arg(long, env = "STORAGE_SERVICE_KEY", hide_env_values = true)]
    storage_service_key: String,

    /// Only remove images at least this many hours old
    #[arg(long, default_value_t = 24)]
    grace_hours: i64,

    /// Report what would be removed without removing anything
    #[arg(long)]
    dry_run: bool,
}

pub(crate) async fn run(args: SweepArgs) -> Result<(), String> {
    let pool = database::connect(&DatabaseOptions::new(args.database_url))
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let db = Db::new(pool);

    let images = HttpImageStore::new(StorageConfig {
        url: args.storage_url,
        service_key: args.storage_service_key,
        public_url: None,
    })
    .map_err(|error| format!("invalid storage configuration: {error}"))?;

    let reconciler = ImageReconciler::new(
        Arc::new(PgCategoriesService::new(db.clone())),
        Arc::new(PgProductsService::new(db)),
        Arc::new(images),
    );

    let report = reconciler
        .sweep(SignedDuration::from_hours(args.grace_hours), args.dry_run)
        .await
        .map_err(|error| format!("failed to sweep images: {error}"))?;

    for bucket in report.buckets {
        println!("bucket: {}", bucket.bucket);
        println!("scanned: {}", bucket.scanned);
        println!("referenced: {}", bucket.referenced);
        println!("within_grace: {}", bucket.recent);

        let verb = if report.dry_run { "would_remove" } else { "removed" };

        println!("{verb}: {}", bucket.removed.len());

        for key in bucket.removed {
            println!("  {key}");
        }

        println!();
    }

    Ok(())
}
