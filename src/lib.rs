//! Rental listing scout: paginated scrapers for Rightmove and OnTheMarket
//! driven by a per-chat conversation.

pub mod config;
pub mod conversation;
pub mod errors;
pub mod logging;
pub mod messaging;
pub mod models;
pub mod orchestrator;
pub mod reporter;
pub mod scrapers;
pub mod telegram;

#[cfg(test)]
pub(crate) mod testing;
