//! Telegram adapter (teloxide).
//!
//! Implements [`Messenger`] over the Bot API and feeds text messages into the
//! [`ConversationController`].

use crate::conversation::{ConversationController, Inbound};
use crate::messaging::{
    ChatId, MessageId, Messenger, MessagingCapabilities, OutgoingMessage, ReplyKeyboard,
    TextFormat,
};
use async_trait::async_trait;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{KeyboardButton, KeyboardMarkup, ParseMode};
use tracing::{debug, info};

#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    fn tg_chat(chat_id: ChatId) -> teloxide::types::ChatId {
        teloxide::types::ChatId(chat_id.0)
    }
}

fn keyboard_markup(keyboard: ReplyKeyboard) -> KeyboardMarkup {
    let rows = keyboard
        .rows
        .into_iter()
        .map(|row| row.into_iter().map(KeyboardButton::new).collect::<Vec<_>>());
    KeyboardMarkup::new(rows)
        .resize_keyboard(true)
        .one_time_keyboard(true)
}

#[async_trait]
impl Messenger for TelegramMessenger {
    fn capabilities(&self) -> MessagingCapabilities {
        MessagingCapabilities {
            supports_html: true,
            supports_keyboards: true,
        }
    }

    async fn send(&self, chat_id: ChatId, message: OutgoingMessage) -> anyhow::Result<MessageId> {
        let mut request = self.bot.send_message(Self::tg_chat(chat_id), message.text);
        if message.format == TextFormat::Html {
            request = request
                .parse_mode(ParseMode::Html)
                .disable_web_page_preview(true);
        }
        if let Some(keyboard) = message.keyboard {
            request = request.reply_markup(keyboard_markup(keyboard));
        }

        let sent = request.await?;
        Ok(MessageId(sent.id.0))
    }

    async fn delete(&self, chat_id: ChatId, message_id: MessageId) -> anyhow::Result<()> {
        self.bot
            .delete_message(
                Self::tg_chat(chat_id),
                teloxide::types::MessageId(message_id.0),
            )
            .await?;
        Ok(())
    }
}

/// Long-poll Telegram until interrupted.
pub async fn run_polling(bot: Bot, controller: Arc<ConversationController>) {
    if let Ok(me) = bot.get_me().await {
        info!("Bot is polling for updates as @{}", me.username());
    }

    let handler = Update::filter_message().endpoint(handle_message);

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![controller])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

async fn handle_message(
    msg: Message,
    controller: Arc<ConversationController>,
) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let chat_id = ChatId(msg.chat.id.0);
    let state = controller.handle(chat_id, Inbound::from_text(text)).await;
    debug!(chat_id = chat_id.0, ?state, "Handled message");
    Ok(())
}
