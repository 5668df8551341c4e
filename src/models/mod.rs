use serde::Serialize;
use std::fmt;

pub const NO_TITLE: &str = "No title";
pub const NO_ADDRESS: &str = "No address";
pub const NO_PRICE: &str = "No price";
pub const NO_LINK: &str = "No link";

/// Title fragment that excludes a listing from every source
const EXCLUDED_CATEGORY: &str = "maisonette";

/// Listing site a scrape runs against
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Rightmove,
    OnTheMarket,
}

impl Platform {
    /// Match free-text user input against the known platforms.
    pub fn parse(input: &str) -> Option<Self> {
        match normalize_input(input).as_str() {
            "rightmove" => Some(Self::Rightmove),
            "onthemarket" => Some(Self::OnTheMarket),
            _ => None,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Rightmove => "Rightmove",
            Self::OnTheMarket => "OnTheMarket",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Normalized property listing, identical in shape for every source
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ListingRecord {
    pub title: String,
    pub address: String,
    pub price: String,
    pub link: String,
}

impl ListingRecord {
    /// Build a record from independently extracted fields, substituting
    /// placeholders for anything the page did not provide.
    pub fn from_parts(
        title: Option<String>,
        address: Option<String>,
        price: Option<String>,
        link: Option<String>,
    ) -> Self {
        Self {
            title: title.unwrap_or_else(|| NO_TITLE.to_string()),
            address: address.unwrap_or_else(|| NO_ADDRESS.to_string()),
            price: price.unwrap_or_else(|| NO_PRICE.to_string()),
            link: link.unwrap_or_else(|| NO_LINK.to_string()),
        }
    }

    pub fn is_excluded(&self) -> bool {
        is_excluded_title(&self.title)
    }
}

/// Trim and lowercase before any case-insensitive comparison.
pub fn normalize_input(input: &str) -> String {
    input.trim().to_lowercase()
}

pub fn is_excluded_title(title: &str) -> bool {
    normalize_input(title).contains(EXCLUDED_CATEGORY)
}

/// Drop excluded categories while keeping source order.
pub fn retain_wanted(records: Vec<ListingRecord>) -> Vec<ListingRecord> {
    records.into_iter().filter(|r| !r.is_excluded()).collect()
}
