//! In-memory fakes for the fetch and messaging ports.

use crate::errors::FetchError;
use crate::messaging::{ChatId, MessageId, Messenger, MessagingCapabilities, OutgoingMessage};
use crate::scrapers::traits::PageFetcher;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Serves canned HTML per URL and records every request.
#[derive(Default)]
pub struct StaticFetcher {
    pages: HashMap<String, Result<String, u16>>,
    fallback: Option<String>,
    requested: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), Ok(html.into()));
        self
    }

    pub fn failing(mut self, url: impl Into<String>, status: u16) -> Self {
        self.pages.insert(url.into(), Err(status));
        self
    }

    /// Body served for any URL without a canned page
    pub fn fallback(mut self, html: impl Into<String>) -> Self {
        self.fallback = Some(html.into());
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.requested.lock().unwrap().push(url.to_string());
        match self.pages.get(url) {
            Some(Ok(html)) => Ok(html.clone()),
            Some(Err(status)) => Err(FetchError::Status {
                url: url.to_string(),
                status: *status,
            }),
            None => Ok(self
                .fallback
                .clone()
                .unwrap_or_else(|| "<html><body></body></html>".to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sent {
    pub chat_id: ChatId,
    pub message_id: MessageId,
    pub message: OutgoingMessage,
}

/// Records outbound traffic; ids are handed out sequentially from 1.
pub struct RecordingMessenger {
    supports_html: bool,
    fail_deletes: bool,
    sent: Mutex<Vec<Sent>>,
    deleted: Mutex<Vec<(ChatId, MessageId)>>,
    next_id: Mutex<i32>,
}

impl RecordingMessenger {
    pub fn new() -> Self {
        Self {
            supports_html: true,
            fail_deletes: false,
            sent: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
            next_id: Mutex::new(1),
        }
    }

    pub fn plain_text_only(mut self) -> Self {
        self.supports_html = false;
        self
    }

    pub fn failing_deletes(mut self) -> Self {
        self.fail_deletes = true;
        self
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent().into_iter().map(|s| s.message.text).collect()
    }

    pub fn deleted(&self) -> Vec<(ChatId, MessageId)> {
        self.deleted.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
        self.deleted.lock().unwrap().clear();
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    fn capabilities(&self) -> MessagingCapabilities {
        MessagingCapabilities {
            supports_html: self.supports_html,
            supports_keyboards: true,
        }
    }

    async fn send(&self, chat_id: ChatId, message: OutgoingMessage) -> anyhow::Result<MessageId> {
        let message_id = {
            let mut next = self.next_id.lock().unwrap();
            let id = MessageId(*next);
            *next += 1;
            id
        };
        self.sent.lock().unwrap().push(Sent {
            chat_id,
            message_id,
            message,
        });
        Ok(message_id)
    }

    async fn delete(&self, chat_id: ChatId, message_id: MessageId) -> anyhow::Result<()> {
        self.deleted.lock().unwrap().push((chat_id, message_id));
        if self.fail_deletes {
            anyhow::bail!("message {} already deleted", message_id.0);
        }
        Ok(())
    }
}
