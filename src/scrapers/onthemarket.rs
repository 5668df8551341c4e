use crate::errors::ScrapeError;
use crate::models::{ListingRecord, Platform};
use crate::scrapers::extract::{compile, href_of, text_of};
use crate::scrapers::pagination::ListingSource;
use crate::scrapers::types::{RecencyWindow, ScrapeParameters, SearchParams};
use scraper::{Html, Selector};

const BASE_URL: &str = "https://www.onthemarket.com";

/// Price widget suffix that is not part of the price
const TENANCY_INFO: &str = "Tenancy info";

/// OnTheMarket rental search, paged by page number
pub struct OnTheMarket {
    search: SearchParams,
    container: Selector,
    card: Selector,
    title: Selector,
    address: Selector,
    price: Selector,
    link: Selector,
}

impl OnTheMarket {
    pub fn new(search: SearchParams) -> Result<Self, ScrapeError> {
        Ok(Self {
            search,
            container: compile("ul.grid-list-tabcontent")?,
            card: compile("div.otm-PropertyCardInfo")?,
            title: compile(r#"span[itemprop="name"]"#)?,
            address: compile("span.address")?,
            price: compile("div.otm-Price")?,
            link: compile("a[href]")?,
        })
    }
}

fn clean_price(raw: String) -> String {
    raw.replace(TENANCY_INFO, "").trim().to_string()
}

impl ListingSource for OnTheMarket {
    type Window = RecencyWindow;

    fn platform(&self) -> Platform {
        Platform::OnTheMarket
    }

    fn window(params: &ScrapeParameters) -> Option<RecencyWindow> {
        match params {
            ScrapeParameters::OnTheMarket(window) => Some(*window),
            _ => None,
        }
    }

    fn first_cursor(&self) -> u32 {
        1
    }

    fn stride(&self) -> u32 {
        1
    }

    fn page_url(&self, window: RecencyWindow, page: u32) -> String {
        format!(
            "{BASE_URL}/to-rent/property/{area}/?max-price={price}&min-bedrooms={beds}\
             &page={page}&recently-added={window}&shared=false&direction=asc",
            area = self.search.area_slug,
            price = self.search.max_price,
            beds = self.search.min_bedrooms,
        )
    }

    fn extract_page(&self, html: &str) -> Vec<ListingRecord> {
        let document = Html::parse_document(html);
        let Some(container) = document.select(&self.container).next() else {
            return Vec::new();
        };

        container
            .select(&self.card)
            .map(|card| {
                ListingRecord::from_parts(
                    text_of(card, &self.title),
                    text_of(card, &self.address),
                    text_of(card, &self.price).map(clean_price),
                    href_of(card, &self.link, BASE_URL),
                )
            })
            .collect()
    }
}
