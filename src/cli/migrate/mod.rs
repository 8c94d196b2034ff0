//! Migrate command - applies or reverts schema migrations, then exits

use clap::Args;
use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::logging;
use crate::infrastructure::storage::{revert_last_migration, run_schema_migrations};

#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Revert the most recently applied migration instead of applying
    #[arg(long)]
    pub revert: bool,
}

pub async fn run(args: MigrateArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging);

    let pool = crate::connect_database(&config).await?;

    let result = if args.revert {
        revert_last_migration(&pool).await.map(|reverted| match reverted {
            Some(version) => info!(version, "Reverted migration"),
            None => info!("No applied migration to revert"),
        })
    } else {
        run_schema_migrations(&pool)
            .await
            .map(|applied| info!(applied, "Schema is up to date"))
    };

    pool.close().await;
    result?;

    Ok(())
}
