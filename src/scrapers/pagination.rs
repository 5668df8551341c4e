use crate::errors::ScrapeError;
use crate::models::{retain_wanted, ListingRecord, Platform};
use crate::scrapers::traits::{PageFetcher, SourceScraper};
use crate::scrapers::types::{ScrapeParameters, ScrapeSettings};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Per-site URL construction and page extraction.
///
/// The paging loop itself lives in [`PaginatedScraper`] so every source
/// shares the same stop conditions, pacing and filtering.
pub trait ListingSource: Send + Sync {
    /// Site-specific recency filter
    type Window: Copy + fmt::Display + Send + Sync;

    fn platform(&self) -> Platform;

    /// Pull this site's window out of the parameters, if they belong to it
    fn window(params: &ScrapeParameters) -> Option<Self::Window>;

    fn first_cursor(&self) -> u32;

    /// Cursor advance between pages
    fn stride(&self) -> u32;

    fn page_url(&self, window: Self::Window, cursor: u32) -> String;

    /// Extract every listing on the page, before category filtering.
    /// An empty result marks the end of the listing.
    fn extract_page(&self, html: &str) -> Vec<ListingRecord>;
}

/// Drives a [`ListingSource`] page by page until it runs dry
pub struct PaginatedScraper<S> {
    source: S,
    fetcher: Arc<dyn PageFetcher>,
    settings: ScrapeSettings,
}

impl<S: ListingSource> PaginatedScraper<S> {
    pub fn new(source: S, fetcher: Arc<dyn PageFetcher>, settings: ScrapeSettings) -> Self {
        Self {
            source,
            fetcher,
            settings,
        }
    }
}

#[async_trait]
impl<S: ListingSource> SourceScraper for PaginatedScraper<S> {
    async fn scrape(&self, params: &ScrapeParameters) -> Result<Vec<ListingRecord>, ScrapeError> {
        let platform = self.source.platform();
        let Some(window) = S::window(params) else {
            return Err(ScrapeError::ParameterMismatch {
                platform,
                got: params.platform(),
            });
        };

        info!("Starting {} scrape for listings added within {}", platform, window);

        let started = Instant::now();
        let mut records = Vec::new();
        let mut cursor = self.source.first_cursor();
        let mut fetched = 0u32;

        loop {
            if fetched >= self.settings.max_pages {
                warn!(
                    "Stopping {} scrape after {} pages (page limit reached)",
                    platform, fetched
                );
                break;
            }
            if started.elapsed() >= self.settings.max_elapsed {
                warn!(
                    "Stopping {} scrape after {:?} (time limit reached)",
                    platform,
                    started.elapsed()
                );
                break;
            }

            let url = self.source.page_url(window, cursor);
            debug!(cursor, "Fetching {} page {}", platform, fetched + 1);

            let html = match self.fetcher.fetch(&url).await {
                Ok(html) => html,
                Err(e) => {
                    error!("Error occurred during {} scraping: {}", platform, e);
                    return Err(e.into());
                }
            };
            fetched += 1;

            let page = self.source.extract_page(&html);
            if page.is_empty() {
                info!("No more properties found on {}", platform);
                break;
            }

            let found = page.len();
            let kept = retain_wanted(page);
            debug!(found, kept = kept.len(), "Parsed {} page", platform);
            records.extend(kept);

            cursor += self.source.stride();
            if fetched >= self.settings.max_pages {
                warn!(
                    "Stopping {} scrape after {} pages (page limit reached)",
                    platform, fetched
                );
                break;
            }
            tokio::time::sleep(self.settings.politeness_delay).await;
        }

        info!(
            "Finished scraping {}. Total properties found: {}",
            platform,
            records.len()
        );
        Ok(records)
    }

    fn platform(&self) -> Platform {
        self.source.platform()
    }
}
