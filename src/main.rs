use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use rent_scout::config::Config;
use rent_scout::conversation::ConversationController;
use rent_scout::logging;
use rent_scout::models::{ListingRecord, Platform};
use rent_scout::orchestrator::ScrapeOrchestrator;
use rent_scout::scrapers::{HttpFetcher, ScrapeParameters};
use rent_scout::telegram::{self, TelegramMessenger};
use serde::Serialize;
use std::sync::Arc;
use teloxide::Bot;
use tracing::info;

#[derive(Parser)]
#[command(name = "rent-scout", about = "Rental listing scout for Rightmove and OnTheMarket")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the Telegram bot (default)
    Bot,
    /// Scrape once and print the listings as JSON
    Scrape {
        /// rightmove or onthemarket
        platform: String,
        /// Days back for Rightmove (1, 3, 7, 14) or recency for OnTheMarket (24-hours, 3-days, 7-days)
        window: String,
    },
}

#[derive(Serialize)]
struct Snapshot<'a> {
    platform: Platform,
    window: String,
    scraped_at: DateTime<Utc>,
    count: usize,
    listings: &'a [ListingRecord],
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let cli = Cli::parse();
    let config = Config::load()?;

    let fetcher = Arc::new(HttpFetcher::new(&config.user_agent, config.request_timeout)?);
    let orchestrator = Arc::new(ScrapeOrchestrator::with_default_sources(
        fetcher,
        config.scrape_settings(),
        config.search.clone(),
    )?);

    match cli.command.unwrap_or(Command::Bot) {
        Command::Bot => {
            let token = config.require_bot_token()?;
            info!("🏠 Rent Scout bot is starting...");

            let bot = Bot::new(token);
            let messenger = Arc::new(TelegramMessenger::new(bot.clone()));
            let controller = Arc::new(ConversationController::new(orchestrator, messenger));
            telegram::run_polling(bot, controller).await;
        }
        Command::Scrape { platform, window } => {
            let platform = Platform::parse(&platform)
                .with_context(|| format!("unknown platform '{platform}'"))?;
            let params = ScrapeParameters::parse(platform, &window)?;

            let listings = orchestrator.run(platform, &params).await?;
            info!("✅ Scraped {} properties", listings.len());

            let snapshot = Snapshot {
                platform,
                window: params.to_string(),
                scraped_at: Utc::now(),
                count: listings.len(),
                listings: &listings,
            };
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
    }

    Ok(())
}
