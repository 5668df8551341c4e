use crate::messaging::{escape_html, OutgoingMessage};
use crate::models::ListingRecord;

const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/?api=1&query=";

pub const NO_RESULTS: &str = "No properties found based on your criteria.";

/// Map search link for a free-text address
pub fn maps_link(address: &str) -> String {
    format!("{}{}", MAPS_SEARCH_URL, address.replace(' ', "+"))
}

/// Composes the outbound notifications for a finished scrape
#[derive(Debug, Clone, Copy)]
pub struct ResultReporter {
    rich_text: bool,
}

impl ResultReporter {
    pub fn new(rich_text: bool) -> Self {
        Self { rich_text }
    }

    /// One message per record in scrape order followed by a total,
    /// or a single "nothing found" notice.
    pub fn compose(&self, records: &[ListingRecord]) -> Vec<OutgoingMessage> {
        if records.is_empty() {
            return vec![OutgoingMessage::plain(NO_RESULTS)];
        }

        let mut messages: Vec<_> = records.iter().map(|r| self.listing(r)).collect();
        messages.push(OutgoingMessage::plain(format!(
            "A total of {} properties were found.",
            records.len()
        )));
        messages
    }

    pub fn listing(&self, record: &ListingRecord) -> OutgoingMessage {
        let maps = maps_link(&record.address);
        if self.rich_text {
            OutgoingMessage::html(format!(
                "<b>Title:</b> <a href=\"{}\">{}</a>\n\
                 <b>Address:</b> <a href=\"{}\">{}</a>\n\
                 <b>Price:</b> {}",
                escape_html(&record.link),
                escape_html(&record.title),
                escape_html(&maps),
                escape_html(&record.address),
                escape_html(&record.price),
            ))
        } else {
            OutgoingMessage::plain(format!(
                "Title: {} ({})\nAddress: {} ({})\nPrice: {}",
                record.title, record.link, record.address, maps, record.price
            ))
        }
    }
}
