pub mod config;
pub mod extractor;
pub mod fetcher;
pub mod repositories;
pub mod scrape;
pub mod sentiment;
pub mod telemetry;
