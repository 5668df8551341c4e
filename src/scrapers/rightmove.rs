use crate::errors::ScrapeError;
use crate::models::{ListingRecord, Platform};
use crate::scrapers::extract::{compile, href_of, text_of};
use crate::scrapers::pagination::ListingSource;
use crate::scrapers::types::{DaysWindow, ScrapeParameters, SearchParams};
use scraper::{Html, Selector};

const BASE_URL: &str = "https://www.rightmove.co.uk";

/// Results per page; the `index` query parameter advances by this much
const PAGE_SIZE: u32 = 24;

const PROPERTY_TYPES: &str =
    "bungalow%2Cdetached%2Cflat%2Cland%2Cpark-home%2Cprivate-halls%2Csemi-detached%2Cterraced";

/// Rightmove rental search, paged by result index
pub struct Rightmove {
    search: SearchParams,
    card: Selector,
    title: Selector,
    address: Selector,
    price: Selector,
    link: Selector,
}

impl Rightmove {
    pub fn new(search: SearchParams) -> Result<Self, ScrapeError> {
        Ok(Self {
            search,
            card: compile("div.PropertyCard_propertyCardContainer__VSRSA")?,
            title: compile("span.PropertyInformation_propertyType__u8e76")?,
            address: compile("address.PropertyAddress_address__LYRPq")?,
            price: compile("div.PropertyPrice_price__VL65t")?,
            link: compile("a.propertyCard-link")?,
        })
    }
}

impl ListingSource for Rightmove {
    type Window = DaysWindow;

    fn platform(&self) -> Platform {
        Platform::Rightmove
    }

    fn window(params: &ScrapeParameters) -> Option<DaysWindow> {
        match params {
            ScrapeParameters::Rightmove(days) => Some(*days),
            _ => None,
        }
    }

    fn first_cursor(&self) -> u32 {
        0
    }

    fn stride(&self) -> u32 {
        PAGE_SIZE
    }

    fn page_url(&self, window: DaysWindow, index: u32) -> String {
        format!(
            "{BASE_URL}/property-to-rent/find.html?locationIdentifier={loc}\
             &minBedrooms={beds}&maxPrice={price}&radius=0.25&sortType=1\
             &propertyTypes={PROPERTY_TYPES}&maxDaysSinceAdded={days}\
             &dontShow=houseShare&furnishTypes=&keywords=&index={index}",
            loc = self.search.location_identifier.replace('^', "%5E"),
            beds = self.search.min_bedrooms,
            price = self.search.max_price,
            days = window.days(),
        )
    }

    fn extract_page(&self, html: &str) -> Vec<ListingRecord> {
        let document = Html::parse_document(html);
        document
            .select(&self.card)
            .map(|card| {
                ListingRecord::from_parts(
                    text_of(card, &self.title),
                    text_of(card, &self.address),
                    text_of(card, &self.price),
                    href_of(card, &self.link, BASE_URL),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NO_LINK, NO_PRICE, NO_TITLE};
    use crate::scrapers::pagination::PaginatedScraper;
    use crate::scrapers::traits::SourceScraper;
    use crate::scrapers::types::ScrapeSettings;
    use crate::testing::StaticFetcher;
    use std::sync::Arc;
    use std::time::Duration;

    fn card(title: &str, address: &str, price: &str, href: &str) -> String {
        format!(
            r#"<div class="PropertyCard_propertyCardContainer__VSRSA">
                 <a class="propertyCard-link" href="{href}">
                   <span class="PropertyInformation_propertyType__u8e76">{title}</span>
                 </a>
                 <address class="PropertyAddress_address__LYRPq">{address}</address>
                 <div class="PropertyPrice_price__VL65t"> {price} </div>
               </div>"#
        )
    }

    fn page(cards: &[String]) -> String {
        format!("<html><body><main>{}</main></body></html>", cards.concat())
    }

    fn source() -> Rightmove {
        Rightmove::new(SearchParams::default()).unwrap()
    }

    #[test]
    fn url_carries_filters_and_index() {
        let url = source().page_url(DaysWindow::Seven, 48);
        assert!(url.starts_with("https://www.rightmove.co.uk/property-to-rent/find.html?"));
        assert!(url.contains("locationIdentifier=REGION%5E92827"));
        assert!(url.contains("&minBedrooms=2&maxPrice=1900"));
        assert!(url.contains("&maxDaysSinceAdded=7"));
        assert!(url.ends_with("&index=48"));
        assert!(!url.contains(' '));
    }

    #[test]
    fn extracts_cards_with_absolute_links() {
        let html = page(&[card(
            "2 bedroom flat",
            "Kilburn High Road, London NW6",
            "£1,850 pcm",
            "/properties/123#/",
        )]);

        let records = source().extract_page(&html);

        assert_eq!(
            records,
            vec![ListingRecord {
                title: "2 bedroom flat".to_string(),
                address: "Kilburn High Road, London NW6".to_string(),
                price: "£1,850 pcm".to_string(),
                link: "https://www.rightmove.co.uk/properties/123#/".to_string(),
            }]
        );
    }

    #[test]
    fn missing_fields_become_placeholders() {
        let html = page(&[
            r#"<div class="PropertyCard_propertyCardContainer__VSRSA">
                 <address class="PropertyAddress_address__LYRPq">1 Elm Row</address>
               </div>"#
                .to_string(),
        ]);

        let records = source().extract_page(&html);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, NO_TITLE);
        assert_eq!(records[0].address, "1 Elm Row");
        assert_eq!(records[0].price, NO_PRICE);
        assert_eq!(records[0].link, NO_LINK);
    }

    #[test]
    fn page_without_cards_is_empty() {
        assert!(source().extract_page("<html><body><p>No results</p></body></html>").is_empty());
        assert!(source().extract_page("").is_empty());
        let lone = page(&[r#"<div class="other"></div>"#.to_string()]);
        assert!(source().extract_page(&lone).is_empty());
    }

    #[tokio::test]
    async fn seven_day_scrape_stops_at_empty_second_page() {
        let s = source();
        let first = s.page_url(DaysWindow::Seven, 0);
        let second = s.page_url(DaysWindow::Seven, 24);
        let fetcher = Arc::new(
            StaticFetcher::new()
                .page(
                    first.clone(),
                    page(&[
                        card("2 bedroom flat", "10 Main St", "£1,700 pcm", "/p/1"),
                        card("Maisonette for rent", "10 Main St", "£1500", "/p/2"),
                        card("3 bedroom terraced house", "5 Park Lane", "£1,900 pcm", "/p/3"),
                    ]),
                )
                .page(second.clone(), page(&[])),
        );
        let scraper = PaginatedScraper::new(
            s,
            fetcher.clone(),
            ScrapeSettings {
                politeness_delay: Duration::ZERO,
                ..ScrapeSettings::default()
            },
        );

        let records = scraper
            .scrape(&ScrapeParameters::Rightmove(DaysWindow::Seven))
            .await
            .unwrap();

        let titles: Vec<_> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["2 bedroom flat", "3 bedroom terraced house"]);
        assert_eq!(fetcher.requested(), vec![first, second]);
    }
}
