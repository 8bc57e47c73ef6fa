//! Telegram update handlers.
//!
//! Each handler normalizes its raw update and hands it to the core
//! moderation pipeline. Failures are logged, never propagated: one bad
//! update must not take down the dispatch loop or affect other chats.

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::ChatMemberUpdated;

use crate::router::AppState;

mod commands;
mod membership;

pub async fn handle_status_change(
    upd: ChatMemberUpdated,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    membership::handle_status_change(upd, state).await
}

pub async fn handle_message(bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    if msg.new_chat_members().is_some() || msg.left_chat_member().is_some() {
        return membership::handle_service_message(msg, state).await;
    }

    if let Some(text) = msg.text() {
        if text == "/ping" || text.starts_with("/ping@") {
            return commands::handle_ping(bot, msg).await;
        }
    }

    Ok(())
}
