use std::sync::Arc;

use anyhow::{Context, Result};
use reviewscope::{
    config::Config, fetcher::Fetcher, repositories::SqliteReviewRepository,
    scrape::ReviewScraper, telemetry,
};

#[tokio::main]
async fn main() -> Result<()> {
    let url = std::env::args()
        .nth(1)
        .context("usage: scrape <product-review-url>")?;

    let config = Config::from_env()?;
    telemetry::init_tracing(config.log_format());

    let repo = SqliteReviewRepository::connect(config.database_url()).await?;
    repo.migrate().await?;

    let fetcher = Fetcher::new(&config.fetch_settings())?;
    let scraper = ReviewScraper::new(fetcher, Arc::new(repo));

    let report = scraper
        .scrape(&url)
        .await
        .with_context(|| format!("scraping {url}"))?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
