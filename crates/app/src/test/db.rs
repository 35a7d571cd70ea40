//! Per-test Postgres databases inside one shared container.

use once_cell::sync::Lazy;
use sqlx::{Connection, PgConnection, PgPool};
use testcontainers::{ContainerAsync, ImageExt, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres as PostgresImage;
use tokio::sync::{OnceCell, mpsc};

const USER: &str = "qrmenu_test";
const PASSWORD: &str = "qrmenu_test_password";

/// Database names are interpolated into DDL, so only plain identifiers pass.
fn validate_database_name(name: &str) -> Result<(), String> {
    if name.is_empty() || name.len() > 63 {
        return Err("database name must be 1-63 characters long".to_string());
    }

    if !name.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') {
        return Err("database name must start with a letter or underscore".to_string());
    }

    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err("database name can only contain letters, digits and underscores".to_string());
    }

    Ok(())
}

async fn init_postgres_container() -> ContainerAsync<PostgresImage> {
    PostgresImage::default()
        .with_user(USER)
        .with_password(PASSWORD)
        .with_db_name("qrmenu_test")
        .with_env_var("POSTGRES_INITDB_ARGS", "--auth-host=trust")
        .start()
        .await
        .expect("Failed to start PostgreSQL container")
}

static POSTGRES_CONTAINER: Lazy<OnceCell<ContainerAsync<PostgresImage>>> = Lazy::new(OnceCell::new);

static CLEANUP_SENDER: Lazy<OnceCell<mpsc::UnboundedSender<String>>> = Lazy::new(OnceCell::new);

async fn init_cleanup_task() -> mpsc::UnboundedSender<String> {
    let (sender, mut receiver) = mpsc::unbounded_channel::<String>();

    tokio::spawn(async move {
        while let Some(db_name) = receiver.recv().await {
            drop_database(&db_name).await;
        }
    });

    sender
}

async fn server_url(database: &str) -> String {
    let container = POSTGRES_CONTAINER
        .get_or_init(init_postgres_container)
        .await;

    let port = container
        .get_host_port_ipv4(5432)
        .await
        .expect("Failed to get container port");

    let host =
        std::env::var("TESTCONTAINERS_HOST_OVERRIDE").unwrap_or_else(|_| "localhost".to_string());

    format!("postgresql://{USER}:{PASSWORD}@{host}:{port}/{database}")
}

async fn drop_database(db_name: &str) {
    if validate_database_name(db_name).is_err() || POSTGRES_CONTAINER.get().is_none() {
        return;
    }

    if let Ok(mut conn) = PgConnection::connect(&server_url("postgres").await).await {
        let _dropped = sqlx::query(&format!("DROP DATABASE IF EXISTS \"{db_name}\""))
            .execute(&mut conn)
            .await;
        let _closed = conn.close().await;
    }
}

/// A freshly migrated database, dropped in the background when this value drops.
///
/// Services commit normally; isolation comes from every test owning its own
/// database.
#[derive(Debug, Clone)]
pub struct TestDb {
    pub pool: PgPool,
    pub name: String,
}

impl Drop for TestDb {
    fn drop(&mut self) {
        if let Some(sender) = CLEANUP_SENDER.get() {
            let _queued = sender.send(self.name.clone());
        }
    }
}

impl TestDb {
    pub async fn new() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("clock before epoch")
            .as_nanos();

        let thread_id = format!("{:?}", std::thread::current().id());
        let thread_id: String = thread_id.chars().filter(char::is_ascii_digit).collect();

        Self::with_name(&format!("qrmenu_test_{nanos}_{thread_id}")).await
    }

    pub async fn with_name(db_name: &str) -> Self {
        CLEANUP_SENDER.get_or_init(init_cleanup_task).await;

        validate_database_name(db_name).expect("invalid test database name");

        let mut conn = PgConnection::connect(&server_url("postgres").await)
            .await
            .expect("Failed to connect to postgres database");

        sqlx::query(&format!("CREATE DATABASE \"{db_name}\""))
            .execute(&mut conn)
            .await
            .expect("Failed to create test database");

        conn.close().await.expect("Failed to close admin connection");

        let pool = PgPool::connect(&server_url(db_name).await)
            .await
            .expect("Failed to create pool for database");

        crate::database::migrate(&pool)
            .await
            .expect("Failed to run migrations on database");

        Self {
            pool,
            name: db_name.to_string(),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_database_name_accepts_identifiers() {
        assert!(validate_database_name("qrmenu_test_1").is_ok());
        assert!(validate_database_name("_leading").is_ok());
    }

    #[test]
    fn validate_database_name_rejects_injection() {
        assert!(validate_database_name("").is_err());
        assert!(validate_database_name("1abc").is_err());
        assert!(validate_database_name("menu\"; DROP TABLE products; --").is_err());
        assert!(validate_database_name(&"a".repeat(64)).is_err());
    }

    #[tokio::test]
    async fn migrations_create_catalog_tables() {
        let test_db = TestDb::new().await;

        let tables: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM information_schema.tables \
             WHERE table_name IN ('categories', 'products')",
        )
        .fetch_one(test_db.pool())
        .await
        .expect("Failed to query tables");

        assert_eq!(tables, 2);
    }
}
