//! Field extraction helpers shared by the HTML sources.

use crate::errors::ScrapeError;
use scraper::{ElementRef, Selector};

pub fn compile(css: &'static str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector {
        selector: css,
        reason: e.to_string(),
    })
}

/// Trimmed descendant text of the first match inside `fragment`.
pub fn text_of(fragment: ElementRef<'_>, selector: &Selector) -> Option<String> {
    fragment
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}

/// `href` of the first match, resolved against `base` when relative.
pub fn href_of(fragment: ElementRef<'_>, selector: &Selector, base: &str) -> Option<String> {
    fragment
        .select(selector)
        .next()
        .and_then(|el| el.value().attr("href"))
        .map(|href| absolutize(base, href))
}

fn absolutize(base: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else {
        format!("{}{}", base, href)
    }
}
