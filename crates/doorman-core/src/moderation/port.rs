use async_trait::async_trait;

use crate::domain::{ChatId, MessageRef, UserId};

/// Structured failure category, as far as the transport can distinguish one.
/// The Bot API communicates most failure kinds through prose only; those
/// arrive as `Api` and are classified by detail text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiErrorCategory {
    RateLimited,
    Timeout,
    Network,
    Authorization,
    Api,
}

/// One remote call failure: structured category plus the API's detail text.
#[derive(Clone, Debug)]
pub struct ApiError {
    pub category: ApiErrorCategory,
    pub detail: String,
}

impl ApiError {
    pub fn api(detail: impl Into<String>) -> Self {
        Self {
            category: ApiErrorCategory::Api,
            detail: detail.into(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.category, self.detail)
    }
}

/// Hexagonal port for the remote chat-control API.
///
/// Every operation is idempotent at the remote end (banning an already-banned
/// user or deleting a deleted message reports an "already gone" failure), so
/// the executor never needs chat-level locking.
#[async_trait]
pub trait ModerationApi: Send + Sync {
    async fn ban(&self, chat: ChatId, user: UserId) -> Result<(), ApiError>;
    async fn unban(&self, chat: ChatId, user: UserId) -> Result<(), ApiError>;
    async fn delete_message(&self, message: MessageRef) -> Result<(), ApiError>;
}
