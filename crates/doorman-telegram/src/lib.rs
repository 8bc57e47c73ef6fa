//! Telegram adapter (teloxide).
//!
//! This crate implements the `doorman-core` ModerationApi over the Telegram
//! Bot API and normalizes its updates into the core event model.

use async_trait::async_trait;

use teloxide::prelude::*;

pub mod handlers;
pub mod normalize;
pub mod router;

use doorman_core::{
    domain::{ChatId, MessageId, MessageRef, UserId},
    moderation::port::{ApiError, ApiErrorCategory, ModerationApi},
};

#[derive(Clone)]
pub struct TelegramModerationApi {
    bot: Bot,
}

impl TelegramModerationApi {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    pub fn bot(&self) -> Bot {
        self.bot.clone()
    }

    fn tg_chat(chat_id: ChatId) -> teloxide::types::ChatId {
        teloxide::types::ChatId(chat_id.0)
    }

    fn tg_user(user: UserId) -> teloxide::types::UserId {
        teloxide::types::UserId(user.0 as u64)
    }

    fn tg_msg_id(message_id: MessageId) -> teloxide::types::MessageId {
        teloxide::types::MessageId(message_id.0)
    }

    /// Keep the transport's structured failure categories where it has them;
    /// everything the Bot API reports only as prose goes through as `Api`
    /// detail text for the core failure classifier.
    fn map_err(e: teloxide::RequestError) -> ApiError {
        use teloxide::RequestError;

        match e {
            RequestError::Api(api) => ApiError {
                category: ApiErrorCategory::Api,
                detail: api.to_string(),
            },
            RequestError::RetryAfter(after) => ApiError {
                category: ApiErrorCategory::RateLimited,
                detail: format!("rate limited, retry after {after:?}"),
            },
            RequestError::MigrateToChatId(to) => ApiError {
                category: ApiErrorCategory::Api,
                detail: format!("group migrated to supergroup {to}"),
            },
            RequestError::Network(err) if err.is_timeout() => ApiError {
                category: ApiErrorCategory::Timeout,
                detail: err.to_string(),
            },
            RequestError::Network(err) => ApiError {
                category: ApiErrorCategory::Network,
                detail: err.to_string(),
            },
            RequestError::Io(err) => ApiError {
                category: ApiErrorCategory::Network,
                detail: err.to_string(),
            },
            // Anything else (invalid JSON and future variants) is not
            // network-shaped; it goes through as prose and defaults to fatal.
            other => ApiError::api(other.to_string()),
        }
    }
}

#[async_trait]
impl ModerationApi for TelegramModerationApi {
    async fn ban(&self, chat: ChatId, user: UserId) -> Result<(), ApiError> {
        self.bot
            .ban_chat_member(Self::tg_chat(chat), Self::tg_user(user))
            .await
            .map(|_| ())
            .map_err(Self::map_err)
    }

    async fn unban(&self, chat: ChatId, user: UserId) -> Result<(), ApiError> {
        self.bot
            .unban_chat_member(Self::tg_chat(chat), Self::tg_user(user))
            .await
            .map(|_| ())
            .map_err(Self::map_err)
    }

    async fn delete_message(&self, message: MessageRef) -> Result<(), ApiError> {
        self.bot
            .delete_message(
                Self::tg_chat(message.chat_id),
                Self::tg_msg_id(message.message_id),
            )
            .await
            .map(|_| ())
            .map_err(Self::map_err)
    }
}
