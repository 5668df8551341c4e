use crate::errors::ConfigError;
use crate::scrapers::fetch::DEFAULT_USER_AGENT;
use crate::scrapers::{ScrapeSettings, SearchParams};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Runtime configuration, read from the environment (and `.env` if present).
#[derive(Clone, Debug)]
pub struct Config {
    pub telegram_bot_token: Option<String>,

    // HTTP
    pub user_agent: String,
    pub request_timeout: Duration,

    // Pagination
    pub politeness_delay: Duration,
    pub max_pages: u32,
    pub max_scrape_time: Duration,

    // Search filters
    pub search: SearchParams,
}

impl Default for Config {
    fn default() -> Self {
        let scrape = ScrapeSettings::default();
        Self {
            telegram_bot_token: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: Duration::from_secs(30),
            politeness_delay: scrape.politeness_delay,
            max_pages: scrape.max_pages,
            max_scrape_time: scrape.max_elapsed,
            search: SearchParams::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        // Missing .env is fine; real deployments set variables directly.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable source; unset or blank values keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let max_pages = parse_or(&get, "SCRAPE_MAX_PAGES", defaults.max_pages)?;
        let max_seconds = parse_or(&get, "SCRAPE_MAX_SECONDS", 300u64)?;

        Ok(Self {
            telegram_bot_token: get("TELEGRAM_BOT_TOKEN"),
            user_agent: get("HTTP_USER_AGENT").unwrap_or(defaults.user_agent),
            request_timeout: parse_or(&get, "HTTP_TIMEOUT_SECS", 30).map(Duration::from_secs)?,
            politeness_delay: parse_or(&get, "SCRAPE_DELAY_MS", 1000).map(Duration::from_millis)?,
            max_pages: non_zero(max_pages, "SCRAPE_MAX_PAGES")?,
            max_scrape_time: non_zero(max_seconds, "SCRAPE_MAX_SECONDS").map(Duration::from_secs)?,
            search: SearchParams {
                location_identifier: get("RIGHTMOVE_LOCATION")
                    .unwrap_or(defaults.search.location_identifier),
                area_slug: get("OTM_AREA").unwrap_or(defaults.search.area_slug),
                max_price: parse_or(&get, "MAX_PRICE", defaults.search.max_price)?,
                min_bedrooms: parse_or(&get, "MIN_BEDROOMS", defaults.search.min_bedrooms)?,
            },
        })
    }

    pub fn scrape_settings(&self) -> ScrapeSettings {
        ScrapeSettings {
            politeness_delay: self.politeness_delay,
            max_pages: self.max_pages,
            max_elapsed: self.max_scrape_time,
        }
    }

    pub fn require_bot_token(&self) -> Result<&str, ConfigError> {
        self.telegram_bot_token
            .as_deref()
            .ok_or(ConfigError::Missing {
                name: "TELEGRAM_BOT_TOKEN",
            })
    }
}

/// Scrape bounds of zero would stop every scrape before its first page.
fn non_zero<T>(value: T, name: &'static str) -> Result<T, ConfigError>
where
    T: Default + PartialEq + ToString,
{
    if value == T::default() {
        return Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
        });
    }
    Ok(value)
}

fn parse_or<T: FromStr>(
    get: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match get(name) {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}
