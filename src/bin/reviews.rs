//! Query stored reviews: `reviews [product=..] [size=..] [colour=..] [sentiment=..]`.
//!
//! Prints the matching reviews together with the distinct values available
//! for each filter.

use anyhow::Result;
use reviewscope::{
    config::Config,
    repositories::{FilterCriteria, ReviewField, ReviewRepositoryTrait, SqliteReviewRepository},
    telemetry,
};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<()> {
    let criteria = FilterCriteria::from_args(std::env::args().skip(1))?;

    let config = Config::from_env()?;
    telemetry::init_tracing(config.log_format());

    let repo = SqliteReviewRepository::connect(config.database_url()).await?;
    repo.migrate().await?;

    let reviews = repo.query(&criteria).await?;
    let output = json!({
        "filter": criteria,
        "choices": {
            "product_names": repo.distinct_values(ReviewField::Title).await?,
            "sizes": repo.distinct_values(ReviewField::StorageSize).await?,
            "colours": repo.distinct_values(ReviewField::Colour).await?,
        },
        "reviews": reviews,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
