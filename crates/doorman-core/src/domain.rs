/// Telegram user id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

/// Telegram chat id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

/// Telegram message id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageId(pub i32);

/// A stable reference to a Telegram message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub chat_id: ChatId,
    pub message_id: MessageId,
}

/// A chat together with its display title, for log lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatRef {
    pub id: ChatId,
    pub title: Option<String>,
}

impl ChatRef {
    /// Title for log output; groups can be untitled in rare cases.
    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or("<untitled>")
    }
}
