#![cfg(test)]
use tokio::sync::OnceCell;
use sea_orm::DatabaseConnection;
use migration::MigratorTrait;
use models::db::{connect_with_config, DATABASE_URL};
use configs::DatabaseConfig;

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<()> = OnceCell::const_new();

/// Live database tests run only with `DATABASE_URL` set and `SKIP_DB_TESTS` unset.
pub fn db_tests_enabled() -> bool {
    std::env::var("SKIP_DB_TESTS").is_err() && std::env::var("DATABASE_URL").is_ok()
}

fn test_config() -> DatabaseConfig {
    DatabaseConfig { url: DATABASE_URL.clone(), min_connections: 1, acquire_timeout_secs: 10, ..DatabaseConfig::default() }
}

pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    // Run migrations exactly once, with a throwaway connection
    MIGRATED
        .get_or_init(|| async {
            let db = connect_with_config(&test_config()).await.expect("connect db for migration");
            migration::Migrator::up(&db, None).await.expect("migrate up");
            drop(db);
        })
        .await;

    // Return a fresh connection for the current test's runtime
    let db = connect_with_config(&test_config()).await?;
    Ok(db)
}
