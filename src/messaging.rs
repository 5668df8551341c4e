//! Outbound messaging port.
//!
//! The conversation core only needs to send a message, get its id back and
//! later delete it. Adapters (Telegram, tests) live behind [`Messenger`].

use async_trait::async_trait;

/// Chat the conversation is held in (numeric, Telegram-style).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

/// Id of a sent message, needed to delete it later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageId(pub i32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextFormat {
    Plain,
    Html,
}

/// One-time reply keyboard, rows of button labels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplyKeyboard {
    pub rows: Vec<Vec<String>>,
}

impl ReplyKeyboard {
    pub fn new<R, S>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub text: String,
    pub format: TextFormat,
    pub keyboard: Option<ReplyKeyboard>,
}

impl OutgoingMessage {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: TextFormat::Plain,
            keyboard: None,
        }
    }

    pub fn html(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: TextFormat::Html,
            keyboard: None,
        }
    }

    pub fn with_keyboard(mut self, keyboard: ReplyKeyboard) -> Self {
        self.keyboard = Some(keyboard);
        self
    }
}

/// Feature flags of a messenger implementation.
#[derive(Clone, Copy, Debug)]
pub struct MessagingCapabilities {
    pub supports_html: bool,
    pub supports_keyboards: bool,
}

#[async_trait]
pub trait Messenger: Send + Sync {
    fn capabilities(&self) -> MessagingCapabilities;

    async fn send(&self, chat_id: ChatId, message: OutgoingMessage) -> anyhow::Result<MessageId>;

    async fn delete(&self, chat_id: ChatId, message_id: MessageId) -> anyhow::Result<()>;
}

/// Escape text for Telegram-flavoured HTML.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_and_quotes() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&lt;/a&gt;"
        );
        assert_eq!(escape_html("£1,500 pcm"), "£1,500 pcm");
    }

    #[test]
    fn keyboard_rows_from_str_slices() {
        let kb = ReplyKeyboard::new([["1", "3"], ["7", "14"]]);
        assert_eq!(kb.rows, vec![vec!["1", "3"], vec!["7", "14"]]);
    }
}
