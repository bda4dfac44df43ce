use reviewscope::{config::Config, repositories::SqliteReviewRepository, telemetry};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    telemetry::init_tracing(config.log_format());

    let repo = SqliteReviewRepository::connect(config.database_url()).await?;

    // runs all pending migrations; no-op if up-to-date
    repo.migrate().await?;
    info!(database_url = config.database_url(), "migrations applied");

    Ok(())
}
