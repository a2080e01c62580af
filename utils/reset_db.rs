use anyhow::Context;
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().init();

    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let db = Database::connect(database_url)
        .await
        .context("Failed to connect to database")?;

    // Rolls back every migration, dropping engineers, projects and reports.
    Migrator::reset(&db).await.context("Failed to reset database")?;

    tracing::info!("Database reset successfully");
    Ok(())
}
