// src/db.rs
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

use crate::config::Config;
use crate::error::StoreError;

pub async fn create_pool(config: &Config) -> Result<Pool<Postgres>, StoreError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    Ok(pool)
}

/// Applies the schema in `migrations/`.
pub async fn migrate(pool: &Pool<Postgres>) -> Result<(), StoreError> {
    sqlx::migrate!().run(pool).await?;
    Ok(())
}
