use crate::errors::{FetchError, ScrapeError};
use crate::models::{ListingRecord, Platform};
use crate::scrapers::types::ScrapeParameters;
use async_trait::async_trait;

/// Common trait for all listing scrapers
#[async_trait]
pub trait SourceScraper: Send + Sync {
    /// Scrape every page of the source, returning filtered records in page order
    async fn scrape(&self, params: &ScrapeParameters) -> Result<Vec<ListingRecord>, ScrapeError>;

    /// Platform this scraper queries
    fn platform(&self) -> Platform;
}

/// Fetches the raw HTML body of one page
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}
