use crate::conversation::session::{ConversationSession, SessionState, SessionStore};
use crate::messaging::{ChatId, Messenger, OutgoingMessage, ReplyKeyboard};
use crate::models::Platform;
use crate::orchestrator::ScrapeOrchestrator;
use crate::reporter::ResultReporter;
use crate::scrapers::{DaysWindow, RecencyWindow, ScrapeParameters};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

const WELCOME: &str = "Welcome! Choose a platform to scrape from. (Or /cancel to exit.)";
const INVALID_PLATFORM: &str =
    "Invalid platform. Please choose 'Rightmove' or 'OnTheMarket', or /cancel to exit.";
const DONE: &str = "Done! Type /start for a new search or /cancel to exit.";
const CANCELLED: &str = "Cancelled. Type /start to begin again.";
const STATE_LOST: &str = "Something went wrong. Please restart with /start or /cancel to exit.";

/// One inbound user event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    Restart,
    Cancel,
    /// Any other slash command, by lowercased name
    Command(String),
    Text(String),
}

impl Inbound {
    /// Classify raw message text; `/start` and `/cancel` (optionally
    /// addressed as `/start@bot`) are triggers, other `/commands` are kept
    /// apart from plain input.
    pub fn from_text(text: &str) -> Self {
        let trimmed = text.trim();
        if let Some(command) = trimmed.strip_prefix('/') {
            let name = command
                .split_whitespace()
                .next()
                .and_then(|c| c.split('@').next())
                .unwrap_or("")
                .to_lowercase();
            return match name.as_str() {
                "start" => Self::Restart,
                "cancel" => Self::Cancel,
                _ => Self::Command(name),
            };
        }
        Self::Text(text.to_string())
    }
}

/// Per-chat dialogue: platform, then window, then scrape and report
pub struct ConversationController {
    orchestrator: Arc<ScrapeOrchestrator>,
    messenger: Arc<dyn Messenger>,
    sessions: SessionStore,
}

impl ConversationController {
    pub fn new(orchestrator: Arc<ScrapeOrchestrator>, messenger: Arc<dyn Messenger>) -> Self {
        Self {
            orchestrator,
            messenger,
            sessions: SessionStore::new(),
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Handle one event to completion and return the chat's new state.
    pub async fn handle(&self, chat_id: ChatId, inbound: Inbound) -> SessionState {
        let state = {
            let mut session = self.sessions.lock(chat_id).await;
            self.dispatch(chat_id, &mut session, inbound).await;
            session.state()
        };
        self.sessions.release(chat_id).await;
        state
    }

    async fn dispatch(&self, chat_id: ChatId, session: &mut ConversationSession, inbound: Inbound) {
        match inbound {
            Inbound::Restart => self.restart(chat_id, session).await,
            Inbound::Cancel => self.cancel(chat_id, session).await,
            Inbound::Command(name) => {
                debug!(chat_id = chat_id.0, "Ignoring unsupported command /{}", name);
            }
            Inbound::Text(text) => match session.state() {
                SessionState::Idle => {
                    debug!(chat_id = chat_id.0, "Ignoring text outside a conversation");
                }
                SessionState::AwaitingPlatform => {
                    self.choose_platform(chat_id, session, &text).await
                }
                SessionState::AwaitingWindow => {
                    self.choose_window(chat_id, session, &text).await
                }
            },
        }
    }

    async fn restart(&self, chat_id: ChatId, session: &mut ConversationSession) {
        info!(chat_id = chat_id.0, "User started a new session");

        for message_id in session.take_outbound() {
            if let Err(e) = self.messenger.delete(chat_id, message_id).await {
                debug!(
                    chat_id = chat_id.0,
                    "Could not delete message {}: {e:#}", message_id.0
                );
            }
        }

        session.await_platform();
        let keyboard = ReplyKeyboard::new([[
            Platform::Rightmove.display_name(),
            Platform::OnTheMarket.display_name(),
        ]]);
        self.notify(
            chat_id,
            session,
            OutgoingMessage::plain(WELCOME).with_keyboard(keyboard),
        )
        .await;
    }

    async fn cancel(&self, chat_id: ChatId, session: &mut ConversationSession) {
        info!(chat_id = chat_id.0, "User cancelled the session");
        session.finish();
        self.notify(chat_id, session, OutgoingMessage::plain(CANCELLED))
            .await;
    }

    async fn choose_platform(
        &self,
        chat_id: ChatId,
        session: &mut ConversationSession,
        text: &str,
    ) {
        let Some(platform) = Platform::parse(text) else {
            debug!(chat_id = chat_id.0, "Unrecognised platform '{}'", text.trim());
            self.notify(chat_id, session, OutgoingMessage::plain(INVALID_PLATFORM))
                .await;
            return;
        };

        info!(chat_id = chat_id.0, "User chose platform: {}", platform);
        session.await_window(platform);
        self.notify(chat_id, session, window_prompt(platform)).await;
    }

    async fn choose_window(&self, chat_id: ChatId, session: &mut ConversationSession, text: &str) {
        let Some(platform) = session.selected_platform() else {
            warn!(chat_id = chat_id.0, "Window chosen with no platform recorded");
            session.finish();
            self.notify(chat_id, session, OutgoingMessage::plain(STATE_LOST))
                .await;
            return;
        };

        let params = match ScrapeParameters::parse(platform, text) {
            Ok(params) => params,
            Err(e) => {
                debug!(chat_id = chat_id.0, "Rejected window choice: {}", e);
                let message = format!(
                    "Invalid choice. Please select {}. Or /cancel to exit.",
                    e.allowed
                );
                self.notify(chat_id, session, OutgoingMessage::plain(message))
                    .await;
                return;
            }
        };

        info!(chat_id = chat_id.0, "User chose window {} on {}", params, platform);
        self.notify(
            chat_id,
            session,
            OutgoingMessage::plain(format!(
                "Scraping {} properties added in the last {}... Please wait.",
                platform, params
            )),
        )
        .await;

        let records = match self.orchestrator.run(platform, &params).await {
            Ok(records) => records,
            Err(e) => {
                error!(chat_id = chat_id.0, "Scrape failed: {e}");
                Vec::new()
            }
        };

        info!(chat_id = chat_id.0, "Notifying user with {} properties", records.len());
        let reporter = ResultReporter::new(self.messenger.capabilities().supports_html);
        for message in reporter.compose(&records) {
            self.notify(chat_id, session, message).await;
        }

        self.notify(chat_id, session, OutgoingMessage::plain(DONE)).await;
        session.finish();
    }

    /// Send and remember the id so the next restart can clean up.
    async fn notify(
        &self,
        chat_id: ChatId,
        session: &mut ConversationSession,
        mut message: OutgoingMessage,
    ) {
        if !self.messenger.capabilities().supports_keyboards {
            message.keyboard = None;
        }
        match self.messenger.send(chat_id, message).await {
            Ok(id) => session.record_outbound(id),
            Err(e) => warn!(chat_id = chat_id.0, "Failed to send message: {e:#}"),
        }
    }
}

fn window_prompt(platform: Platform) -> OutgoingMessage {
    match platform {
        Platform::Rightmove => OutgoingMessage::plain(format!(
            "How many days back should we search? ({})",
            DaysWindow::ALLOWED
        ))
        .with_keyboard(ReplyKeyboard::new(
            DaysWindow::CHOICES.chunks(2).map(|row| row.iter().copied()),
        )),
        Platform::OnTheMarket => OutgoingMessage::plain(format!(
            "How recently added should the properties be? ({})",
            RecencyWindow::CHOICES.join(", ")
        ))
        .with_keyboard(ReplyKeyboard::new([RecencyWindow::CHOICES])),
    }
}
