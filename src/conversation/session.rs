use crate::messaging::{ChatId, MessageId};
use crate::models::Platform;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    AwaitingPlatform,
    AwaitingWindow,
}

/// Dialogue state for one chat
#[derive(Debug, Clone, Default)]
pub struct ConversationSession {
    state: SessionState,
    selected_platform: Option<Platform>,
    outbound_message_ids: Vec<MessageId>,
}

impl ConversationSession {
    #[cfg(test)]
    pub(crate) fn with_state(state: SessionState) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn selected_platform(&self) -> Option<Platform> {
        self.selected_platform
    }

    pub fn outbound_message_ids(&self) -> &[MessageId] {
        &self.outbound_message_ids
    }

    /// Idle with nothing to remember
    pub fn is_blank(&self) -> bool {
        self.state == SessionState::Idle
            && self.selected_platform.is_none()
            && self.outbound_message_ids.is_empty()
    }

    pub(crate) fn await_platform(&mut self) {
        self.state = SessionState::AwaitingPlatform;
        self.selected_platform = None;
    }

    pub(crate) fn await_window(&mut self, platform: Platform) {
        self.state = SessionState::AwaitingWindow;
        self.selected_platform = Some(platform);
    }

    /// Back to Idle; the message history is kept for the next restart.
    pub(crate) fn finish(&mut self) {
        self.state = SessionState::Idle;
        self.selected_platform = None;
    }

    pub(crate) fn record_outbound(&mut self, id: MessageId) {
        self.outbound_message_ids.push(id);
    }

    /// Hand over the recorded ids for deletion, leaving the list empty.
    pub(crate) fn take_outbound(&mut self) -> Vec<MessageId> {
        std::mem::take(&mut self.outbound_message_ids)
    }
}

/// Sessions keyed by chat; each chat's session sits behind its own lock so
/// events for one chat are handled one at a time while other chats proceed.
///
/// Entries live as long as the chat has a transcript to clean up on the next
/// `/start`. Blank sessions are dropped again by [`SessionStore::release`].
#[derive(Default)]
pub struct SessionStore {
    inner: Mutex<HashMap<ChatId, Arc<Mutex<ConversationSession>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the chat's session, creating an Idle one on first contact.
    pub async fn lock(&self, chat_id: ChatId) -> OwnedMutexGuard<ConversationSession> {
        let session = {
            let mut map = self.inner.lock().await;
            map.entry(chat_id).or_default().clone()
        };
        session.lock_owned().await
    }

    /// Forget the chat if its session is blank and no other event holds it.
    pub async fn release(&self, chat_id: ChatId) {
        let mut map = self.inner.lock().await;
        // Clones are only taken under the map lock, so a count of one is stable here.
        let removable = match map.get(&chat_id) {
            Some(session) if Arc::strong_count(session) == 1 => session
                .try_lock()
                .map(|session| session.is_blank())
                .unwrap_or(false),
            _ => false,
        };
        if removable {
            map.remove(&chat_id);
        }
    }

    pub async fn snapshot(&self, chat_id: ChatId) -> Option<ConversationSession> {
        let session = self.inner.lock().await.get(&chat_id).cloned()?;
        let guard = session.lock().await;
        Some(guard.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_idle_and_empty() {
        let s = ConversationSession::default();
        assert_eq!(s.state(), SessionState::Idle);
        assert_eq!(s.selected_platform(), None);
        assert!(s.outbound_message_ids().is_empty());
        assert!(s.is_blank());
    }

    #[test]
    fn take_outbound_clears_history() {
        let mut s = ConversationSession::default();
        s.record_outbound(MessageId(4));
        s.record_outbound(MessageId(5));
        assert_eq!(s.take_outbound(), vec![MessageId(4), MessageId(5)]);
        assert!(s.outbound_message_ids().is_empty());
    }

    #[test]
    fn finish_keeps_history_but_drops_platform() {
        let mut s = ConversationSession::default();
        s.await_window(Platform::Rightmove);
        s.record_outbound(MessageId(1));
        s.finish();
        assert_eq!(s.state(), SessionState::Idle);
        assert_eq!(s.selected_platform(), None);
        assert_eq!(s.outbound_message_ids(), &[MessageId(1)]);
    }

    #[tokio::test]
    async fn chats_do_not_share_sessions() {
        let store = SessionStore::new();
        store.lock(ChatId(1)).await.await_window(Platform::OnTheMarket);

        let other = store.lock(ChatId(2)).await;
        assert_eq!(other.state(), SessionState::Idle);
        drop(other);

        let first = store.snapshot(ChatId(1)).await.unwrap();
        assert_eq!(first.selected_platform(), Some(Platform::OnTheMarket));
        assert!(store.snapshot(ChatId(3)).await.is_none());
    }

    #[tokio::test]
    async fn release_drops_only_blank_unheld_sessions() {
        let store = SessionStore::new();

        drop(store.lock(ChatId(1)).await);
        store.release(ChatId(1)).await;
        assert!(store.snapshot(ChatId(1)).await.is_none());

        store.lock(ChatId(2)).await.record_outbound(MessageId(9));
        store.release(ChatId(2)).await;
        assert!(store.snapshot(ChatId(2)).await.is_some());

        let held = store.lock(ChatId(3)).await;
        store.release(ChatId(3)).await;
        drop(held);
        assert!(store.snapshot(ChatId(3)).await.is_some());

        store.release(ChatId(4)).await;
        assert!(store.snapshot(ChatId(4)).await.is_none());
    }
}
