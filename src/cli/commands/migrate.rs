use anyhow::{bail, Context};

use crate::config::{AppConfig, StorageBackend};
use crate::database::DatabaseManager;

pub async fn handle(config: AppConfig) -> anyhow::Result<()> {
    if config.database.backend != StorageBackend::Postgres {
        bail!("migrate needs the postgres backend; set DATABASE_URL");
    }

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to the database")?;
    DatabaseManager::migrate(&pool).await.context("migration failed")?;

    println!("Schema is up to date");
    Ok(())
}
