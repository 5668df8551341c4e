use crate::errors::ParseError;
use crate::models::{normalize_input, Platform};
use std::fmt;
use std::time::Duration;

/// Fixed search filters baked into every listing URL
#[derive(Debug, Clone)]
pub struct SearchParams {
    /// Rightmove geography identifier (e.g. `REGION^92827`)
    pub location_identifier: String,
    /// OnTheMarket area path segment
    pub area_slug: String,
    /// Maximum monthly rent (GBP)
    pub max_price: u32,
    /// Minimum number of bedrooms
    pub min_bedrooms: u32,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            location_identifier: "REGION^92827".to_string(),
            area_slug: "north-west-london".to_string(),
            max_price: 1900,
            min_bedrooms: 2,
        }
    }
}

/// How many days back Rightmove listings may have been added
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaysWindow {
    One,
    Three,
    Seven,
    Fourteen,
}

impl DaysWindow {
    pub const ALLOWED: &'static str = "1, 3, 7, or 14";
    pub const CHOICES: [&'static str; 4] = ["1", "3", "7", "14"];

    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let err = || ParseError {
            input: input.to_string(),
            allowed: Self::ALLOWED,
        };
        match normalize_input(input).parse::<u32>().map_err(|_| err())? {
            1 => Ok(Self::One),
            3 => Ok(Self::Three),
            7 => Ok(Self::Seven),
            14 => Ok(Self::Fourteen),
            _ => Err(err()),
        }
    }

    pub fn days(self) -> u32 {
        match self {
            Self::One => 1,
            Self::Three => 3,
            Self::Seven => 7,
            Self::Fourteen => 14,
        }
    }
}

impl fmt::Display for DaysWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.days())
    }
}

/// OnTheMarket "recently added" filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecencyWindow {
    Day,
    ThreeDays,
    Week,
}

impl RecencyWindow {
    pub const ALLOWED: &'static str = "'24-hours', '3-days', or '7-days'";
    pub const CHOICES: [&'static str; 3] = ["24-hours", "3-days", "7-days"];

    pub fn parse(input: &str) -> Result<Self, ParseError> {
        match normalize_input(input).as_str() {
            "24-hours" => Ok(Self::Day),
            "3-days" => Ok(Self::ThreeDays),
            "7-days" => Ok(Self::Week),
            _ => Err(ParseError {
                input: input.to_string(),
                allowed: Self::ALLOWED,
            }),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day => "24-hours",
            Self::ThreeDays => "3-days",
            Self::Week => "7-days",
        }
    }
}

impl fmt::Display for RecencyWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated, platform-specific scrape parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrapeParameters {
    Rightmove(DaysWindow),
    OnTheMarket(RecencyWindow),
}

impl ScrapeParameters {
    /// Validate a window choice for the given platform.
    pub fn parse(platform: Platform, input: &str) -> Result<Self, ParseError> {
        match platform {
            Platform::Rightmove => DaysWindow::parse(input).map(Self::Rightmove),
            Platform::OnTheMarket => RecencyWindow::parse(input).map(Self::OnTheMarket),
        }
    }

    pub fn platform(&self) -> Platform {
        match self {
            Self::Rightmove(_) => Platform::Rightmove,
            Self::OnTheMarket(_) => Platform::OnTheMarket,
        }
    }
}

impl fmt::Display for ScrapeParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rightmove(days) => write!(f, "{days} days"),
            Self::OnTheMarket(window) => write!(f, "{window}"),
        }
    }
}

/// Pagination pacing and safety bounds
#[derive(Debug, Clone, Copy)]
pub struct ScrapeSettings {
    pub politeness_delay: Duration,
    pub max_pages: u32,
    pub max_elapsed: Duration,
}

impl Default for ScrapeSettings {
    fn default() -> Self {
        Self {
            politeness_delay: Duration::from_secs(1),
            max_pages: 50,
            max_elapsed: Duration::from_secs(300),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn days_window_accepts_only_allowed_integers() {
        assert_eq!(DaysWindow::parse("7"), Ok(DaysWindow::Seven));
        assert_eq!(DaysWindow::parse(" 14 "), Ok(DaysWindow::Fourteen));
        assert!(DaysWindow::parse("2").is_err());
        assert!(DaysWindow::parse("seven").is_err());
        assert!(DaysWindow::parse("7.0").is_err());
        assert!(DaysWindow::parse("").is_err());
    }

    #[test]
    fn recency_window_accepts_only_literals() {
        assert_eq!(RecencyWindow::parse("3-days"), Ok(RecencyWindow::ThreeDays));
        assert_eq!(RecencyWindow::parse("24-Hours"), Ok(RecencyWindow::Day));
        let err = RecencyWindow::parse("2 days").unwrap_err();
        assert_eq!(err.input, "2 days");
        assert_eq!(err.allowed, RecencyWindow::ALLOWED);
        assert!(RecencyWindow::parse("3 days").is_err());
    }

    #[test]
    fn parameters_are_platform_specific() {
        assert_eq!(
            ScrapeParameters::parse(Platform::Rightmove, "1"),
            Ok(ScrapeParameters::Rightmove(DaysWindow::One))
        );
        assert!(ScrapeParameters::parse(Platform::Rightmove, "7-days").is_err());
        assert!(ScrapeParameters::parse(Platform::OnTheMarket, "7").is_err());
        assert_eq!(
            ScrapeParameters::parse(Platform::OnTheMarket, "7-days")
                .unwrap()
                .platform(),
            Platform::OnTheMarket
        );
    }
}
