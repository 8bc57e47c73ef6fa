use std::{future::Future, sync::Arc, time::Duration};

use tracing::{debug, error, info, warn};

use crate::domain::{ChatId, ChatRef, MessageRef, UserId};

use super::classify::classify;
use super::failure::{classify_failure, FailureKind};
use super::port::{ApiError, ModerationApi};
use super::types::{Action, MembershipEvent, RemoteCallOutcome};

/// Carries out moderation actions against the remote API with the per-call
/// retry/suppress/escalate policy.
pub struct Executor {
    api: Arc<dyn ModerationApi>,
    retry_delay: Duration,
}

impl Executor {
    pub fn new(api: Arc<dyn ModerationApi>, retry_delay: Duration) -> Self {
        Self { api, retry_delay }
    }

    pub async fn run(&self, chat: &ChatRef, action: Action) {
        match action {
            Action::None => {}
            Action::Evict { chat: chat_id, subject } => {
                self.evict(chat, chat_id, subject).await;
            }
            Action::DeleteMessage { message } => {
                self.delete(chat, message).await;
            }
            Action::EvictAndDelete {
                chat: chat_id,
                subject,
                message,
            } => {
                self.evict(chat, chat_id, subject).await;
                self.delete(chat, message).await;
            }
        }
    }

    /// Kick = ban then unban. The unban is what turns the permanent ban into
    /// a kick, so it is attempted even after an expected ban failure; only a
    /// fatal ban failure (the chat or user no longer resolves) skips it.
    async fn evict(&self, chat: &ChatRef, chat_id: ChatId, subject: UserId) {
        info!(
            "[{}] {}: RUNNING: kickout user {}",
            chat.id.0,
            chat.title_or_default(),
            subject.0
        );

        let ban = self
            .call(chat, "ban", || self.api.ban(chat_id, subject))
            .await;
        if let RemoteCallOutcome::Failed {
            kind: FailureKind::Fatal,
            ..
        } = ban
        {
            return;
        }

        self.call(chat, "unban", || self.api.unban(chat_id, subject))
            .await;
    }

    async fn delete(&self, chat: &ChatRef, message: MessageRef) -> RemoteCallOutcome {
        info!(
            "[{}] {}: RUNNING: remove membership notice",
            chat.id.0,
            chat.title_or_default()
        );
        self.call(chat, "delete_message", || self.api.delete_message(message))
            .await
    }

    /// One remote call under policy: a single retry after a short fixed delay
    /// for transient failures, then per-kind logging. No failure propagates.
    async fn call<F, Fut>(&self, chat: &ChatRef, op: &str, mut f: F) -> RemoteCallOutcome
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<(), ApiError>>,
    {
        let mut retried = false;
        loop {
            let err = match f().await {
                Ok(()) => return RemoteCallOutcome::Success,
                Err(err) => err,
            };

            let kind = classify_failure(&err);
            if kind == FailureKind::Transient && !retried {
                retried = true;
                debug!(
                    "[{}] {}: {op}: transient failure ({}), retrying",
                    chat.id.0,
                    chat.title_or_default(),
                    err.detail
                );
                tokio::time::sleep(self.retry_delay).await;
                continue;
            }

            self.log_failure(chat, op, kind, &err);
            return RemoteCallOutcome::Failed {
                kind,
                detail: err.detail,
            };
        }
    }

    fn log_failure(&self, chat: &ChatRef, op: &str, kind: FailureKind, err: &ApiError) {
        let chat_id = chat.id.0;
        let title = chat.title_or_default();
        match kind {
            FailureKind::Transient => {
                warn!("[{chat_id}] {title}: {op}: still failing after retry: {}", err.detail);
            }
            FailureKind::PermissionDenied => {
                debug!("[{chat_id}] {title}: {op}: missing admin rights: {}", err.detail);
            }
            FailureKind::AlreadyGone => {
                info!("[{chat_id}] {title}: {op}: already done: {}", err.detail);
            }
            FailureKind::Fatal => {
                error!("[{chat_id}] {title}: {op}: unexpected failure: {err}");
            }
        }
    }
}

/// Dispatch entry: classify one event, then execute the decision.
///
/// Remote failures are absorbed by the executor's per-call policy, so
/// handling one event can never fail the caller or affect other chats.
pub struct Moderator {
    bot_id: UserId,
    executor: Executor,
}

impl Moderator {
    pub fn new(bot_id: UserId, api: Arc<dyn ModerationApi>, retry_delay: Duration) -> Self {
        Self {
            bot_id,
            executor: Executor::new(api, retry_delay),
        }
    }

    pub async fn handle(&self, ev: &MembershipEvent) {
        let action = classify(self.bot_id, ev);
        self.executor.run(&ev.chat, action).await;
    }
}
