/// Row helpers against a live database
pub mod pal_tests;

use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

/// Live database tests run only with `DATABASE_URL` set and `SKIP_DB_TESTS` unset.
pub fn db_tests_enabled() -> bool {
    std::env::var("SKIP_DB_TESTS").is_err() && std::env::var("DATABASE_URL").is_ok()
}

pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = crate::db::connect().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
