//! Message handlers module
//!
//! Bridges teloxide messages to the session controller and delivers replies

use std::sync::Arc;
use std::time::Duration;
use teloxide::{Bot, types::{ChatId, Message}, prelude::*};
use tracing::{debug, info, warn};
use crate::handlers::router::redact_for_log;
use crate::models::{Incoming, Sender};
use crate::state::SessionController;
use crate::utils::errors::{LessonBotError, Result};
use crate::utils::helpers::{split_message, TELEGRAM_MESSAGE_LIMIT};

/// Upper bound on delivering one reply, injected through the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyTimeout(pub Duration);

/// Convert a Telegram message into an [`Incoming`].
///
/// Messages without an author are not handled. Photos, stickers and other
/// media carry empty text and get the help reply.
pub fn incoming_from_message(msg: &Message) -> Option<Incoming> {
    let from = msg.from.as_ref()?;
    let text = msg.text().unwrap_or_default();

    Some(Incoming {
        chat_id: msg.chat.id.0,
        sender: Sender {
            id: from.id.0 as i64,
            first_name: from.first_name.clone(),
            last_name: from.last_name.clone(),
            username: from.username.clone(),
        },
        text: text.to_string(),
    })
}

/// Handle incoming text messages
pub async fn handle_message(
    bot: Bot,
    msg: Message,
    controller: Arc<SessionController>,
    timeout: ReplyTimeout,
) -> Result<()> {
    let Some(incoming) = incoming_from_message(&msg) else {
        debug!(chat_id = ?msg.chat.id, "Ignoring message without sender");
        return Ok(());
    };

    info!(
        user_id = incoming.sender.id,
        chat_id = incoming.chat_id,
        text = %redact_for_log(&incoming.text),
        "Get message"
    );

    let Some(reply) = controller.handle(&incoming).await else {
        return Ok(());
    };
    match send_reply(&bot, msg.chat.id, &reply, timeout.0).await {
        Err(e) if e.is_recoverable() => {
            warn!(chat_id = incoming.chat_id, severity = %e.severity(), error = %e, "Reply not delivered");
            Ok(())
        }
        result => result,
    }
}

/// Send `text`, split into Telegram-sized chunks, each bounded by `timeout`
pub async fn send_reply(bot: &Bot, chat_id: ChatId, text: &str, timeout: Duration) -> Result<()> {
    if text.trim().is_empty() {
        return Ok(());
    }

    for chunk in split_message(text, TELEGRAM_MESSAGE_LIMIT) {
        match tokio::time::timeout(timeout, bot.send_message(chat_id, chunk).send()).await {
            Ok(result) => {
                result?;
            }
            Err(_) => {
                return Err(LessonBotError::Timeout(format!("reply to chat {}", chat_id.0)));
            }
        }
    }

    debug!(chat_id = ?chat_id, "Reply delivered");
    Ok(())
}
