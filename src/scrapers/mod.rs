pub mod extract;
pub mod fetch;
pub mod onthemarket;
pub mod pagination;
pub mod rightmove;
pub mod traits;
pub mod types;

pub use fetch::HttpFetcher;
pub use onthemarket::OnTheMarket;
pub use pagination::{ListingSource, PaginatedScraper};
pub use rightmove::Rightmove;
pub use traits::{PageFetcher, SourceScraper};
pub use types::{DaysWindow, RecencyWindow, ScrapeParameters, ScrapeSettings, SearchParams};
