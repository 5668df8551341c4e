use crate::models::Platform;

/// Transport-level failure while fetching one page.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },
}

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("transport error: {0}")]
    Transport(#[from] FetchError),

    #[error("{platform} scraper cannot run with {got} parameters")]
    ParameterMismatch { platform: Platform, got: Platform },

    #[error("no scraper registered for {0}")]
    UnknownPlatform(Platform),

    #[error("invalid selector {selector}: {reason}")]
    Selector {
        selector: &'static str,
        reason: String,
    },
}

/// User input that is not in the allowed set for the current step.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{input}' is not one of {allowed}")]
pub struct ParseError {
    pub input: String,
    pub allowed: &'static str,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} environment variable is required")]
    Missing { name: &'static str },

    #[error("{name} has invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}
