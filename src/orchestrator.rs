use crate::errors::ScrapeError;
use crate::models::{ListingRecord, Platform};
use crate::scrapers::{
    OnTheMarket, PageFetcher, PaginatedScraper, Rightmove, ScrapeParameters, ScrapeSettings,
    SearchParams, SourceScraper,
};
use std::sync::Arc;
use tracing::info;

/// Dispatches a scrape request to the scraper registered for its platform
pub struct ScrapeOrchestrator {
    scrapers: Vec<Arc<dyn SourceScraper>>,
}

impl ScrapeOrchestrator {
    pub fn new() -> Self {
        Self {
            scrapers: Vec::new(),
        }
    }

    /// Both listing sites over one shared fetcher
    pub fn with_default_sources(
        fetcher: Arc<dyn PageFetcher>,
        settings: ScrapeSettings,
        search: SearchParams,
    ) -> Result<Self, ScrapeError> {
        let rightmove =
            PaginatedScraper::new(Rightmove::new(search.clone())?, fetcher.clone(), settings);
        let onthemarket = PaginatedScraper::new(OnTheMarket::new(search)?, fetcher, settings);

        Ok(Self::new()
            .register(Arc::new(rightmove))
            .register(Arc::new(onthemarket)))
    }

    /// Register a scraper, replacing any previous one for the same platform
    pub fn register(mut self, scraper: Arc<dyn SourceScraper>) -> Self {
        self.scrapers.retain(|s| s.platform() != scraper.platform());
        self.scrapers.push(scraper);
        self
    }

    pub fn platforms(&self) -> Vec<Platform> {
        self.scrapers.iter().map(|s| s.platform()).collect()
    }

    pub async fn run(
        &self,
        platform: Platform,
        params: &ScrapeParameters,
    ) -> Result<Vec<ListingRecord>, ScrapeError> {
        if params.platform() != platform {
            return Err(ScrapeError::ParameterMismatch {
                platform,
                got: params.platform(),
            });
        }

        let scraper = self
            .scrapers
            .iter()
            .find(|s| s.platform() == platform)
            .ok_or(ScrapeError::UnknownPlatform(platform))?;

        info!("Scraping {} properties added within {}", platform, params);
        let records = scraper.scrape(params).await?;
        info!("{} scrape returned {} properties", platform, records.len());

        Ok(records)
    }
}

impl Default for ScrapeOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}
