use clap::Args;
use qrmenu_app::{
    database::{self, DatabaseOptions, Db},
    domain::{
        categories::{CategoriesService, PgCategoriesService},
        products::{PgProductsService, ProductsService},
    },
};

#[derive(Debug, Args)]
pub(crate) struct SummaryArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Apply pending migrations first
    #[arg(long)]
    migrate: bool,
}

pub(crate) async fn run(args: SummaryArgs) -> Result<(), String> {
    let pool = database::connect(&DatabaseOptions::new(args.database_url))
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    if args.migrate {
        database::migrate(&pool)
            .await
            .map_err(|error| format!("failed to apply migrations: {error}"))?;
    }

    let db = Db::new(pool);

    let categories = PgCategoriesService::new(db.clone())
        .count_categories()
        .await
        .map_err(|error| format!("failed to count categories: {error}"))?;

    let products = PgProductsService::new(db)
        .count_products()
        .await
        .map_err(|error| format!("failed to count products: {error}"))?;

    println!("categories: {categories}");
    println!("products: {products}");

    Ok(())
}
