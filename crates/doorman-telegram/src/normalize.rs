//! Maps raw teloxide updates into the canonical `MembershipEvent`.
//!
//! Telegram-specific shapes stay in this crate; the core only sees the
//! normalized event model. Pure mapping aside from the raw-transition log.

use teloxide::types::{Chat, ChatMemberKind, ChatMemberUpdated, Message};
use tracing::info;

use doorman_core::domain::{ChatId, ChatRef, MessageId, MessageRef, UserId};
use doorman_core::moderation::types::{
    Direction, EventSource, MemberStatus, MembershipEvent, StatusChange,
};

/// Native member-status-transition update.
pub fn from_status_update(upd: &ChatMemberUpdated) -> MembershipEvent {
    let chat = chat_ref(&upd.chat);
    let actor = UserId(upd.from.id.0 as i64);
    let subject = UserId(upd.new_chat_member.user.id.0 as i64);
    let prior = map_status(&upd.old_chat_member.kind);
    let new = map_status(&upd.new_chat_member.kind);

    info!(
        "[{}] {}: STATUS_CHANGE: ({}) ({}) {prior} -> {new}",
        chat.id.0,
        chat.title_or_default(),
        actor.0,
        subject.0
    );

    let direction = if new.in_group() {
        Direction::Joined
    } else {
        Direction::Left
    };

    MembershipEvent {
        chat,
        actor: Some(actor),
        subject,
        direction,
        source: EventSource::StatusTransition,
        transition: Some(StatusChange { prior, new }),
        message: None,
        co_joined: 0,
    }
}

/// Join/left service message. Returns `None` for any other message.
///
/// A join notice naming several users becomes one event whose subject is the
/// first listed user, with the rest counted in `co_joined`.
pub fn from_service_message(msg: &Message) -> Option<MembershipEvent> {
    let chat = chat_ref(&msg.chat);
    let message = MessageRef {
        chat_id: chat.id,
        message_id: MessageId(msg.id.0),
    };
    let sender = msg.from.as_ref().map(|u| UserId(u.id.0 as i64));

    if let Some(new_members) = msg.new_chat_members() {
        let first = new_members.first()?;
        info!(
            "[{}] {}: JOIN_NOTICE: {} member(s)",
            chat.id.0,
            chat.title_or_default(),
            new_members.len()
        );

        return Some(MembershipEvent {
            chat,
            actor: sender,
            subject: UserId(first.id.0 as i64),
            direction: Direction::Joined,
            source: EventSource::MessageAnnotation,
            transition: None,
            message: Some(message),
            co_joined: new_members.len() - 1,
        });
    }

    if let Some(left) = msg.left_chat_member() {
        info!(
            "[{}] {}: LEFT_NOTICE: ({})",
            chat.id.0,
            chat.title_or_default(),
            left.id.0
        );

        return Some(MembershipEvent {
            chat,
            actor: sender,
            subject: UserId(left.id.0 as i64),
            direction: Direction::Left,
            source: EventSource::MessageAnnotation,
            transition: None,
            message: Some(message),
            co_joined: 0,
        });
    }

    None
}

fn chat_ref(chat: &Chat) -> ChatRef {
    ChatRef {
        id: ChatId(chat.id.0),
        title: chat.title().map(|t| t.to_string()),
    }
}

fn map_status(kind: &ChatMemberKind) -> MemberStatus {
    match kind {
        ChatMemberKind::Owner { .. } => MemberStatus::Owner,
        ChatMemberKind::Administrator { .. } => MemberStatus::Administrator,
        ChatMemberKind::Member { .. } => MemberStatus::Member,
        ChatMemberKind::Restricted(r) => MemberStatus::Restricted {
            is_member: r.is_member,
        },
        ChatMemberKind::Left => MemberStatus::Left,
        ChatMemberKind::Banned { .. } => MemberStatus::Banned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Raw Bot API payloads, deserialized the same way the update listener
    // receives them.

    const CHAT: &str = r#"{"id": -100123, "title": "test group", "type": "supergroup"}"#;

    fn message(json: &str) -> Message {
        serde_json::from_str(json).expect("valid telegram message payload")
    }

    fn join_notice(members: &str) -> Message {
        message(&format!(
            r#"{{
                "message_id": 7,
                "date": 1704067200,
                "chat": {CHAT},
                "from": {{"id": 2, "is_bot": false, "first_name": "Inviter"}},
                "new_chat_members": {members}
            }}"#
        ))
    }

    #[test]
    fn plain_member_states_map_directly() {
        let member: teloxide::types::ChatMember = serde_json::from_str(
            r#"{"status": "member", "user": {"id": 1, "is_bot": false, "first_name": "A"}}"#,
        )
        .expect("valid chat member payload");

        assert_eq!(map_status(&member.kind), MemberStatus::Member);
        assert_eq!(map_status(&ChatMemberKind::Left), MemberStatus::Left);
    }

    #[test]
    fn lone_join_notice_becomes_one_join_event() {
        let msg = join_notice(r#"[{"id": 3, "is_bot": false, "first_name": "A"}]"#);
        let ev = from_service_message(&msg).expect("join notice normalizes");

        assert_eq!(ev.chat.id, ChatId(-100123));
        assert_eq!(ev.chat.title.as_deref(), Some("test group"));
        assert_eq!(ev.actor, Some(UserId(2)));
        assert_eq!(ev.subject, UserId(3));
        assert_eq!(ev.direction, Direction::Joined);
        assert_eq!(ev.source, EventSource::MessageAnnotation);
        assert_eq!(ev.co_joined, 0);
        assert_eq!(
            ev.message,
            Some(MessageRef {
                chat_id: ChatId(-100123),
                message_id: MessageId(7),
            })
        );
    }

    #[test]
    fn bulk_add_notice_counts_the_extra_members() {
        let msg = join_notice(
            r#"[
                {"id": 3, "is_bot": false, "first_name": "A"},
                {"id": 4, "is_bot": false, "first_name": "B"}
            ]"#,
        );
        let ev = from_service_message(&msg).expect("join notice normalizes");

        // Subject is the first listed user; the rest feed the bulk-add rule.
        assert_eq!(ev.subject, UserId(3));
        assert_eq!(ev.co_joined, 1);
    }

    #[test]
    fn left_notice_carries_the_sender_as_actor() {
        let msg = message(&format!(
            r#"{{
                "message_id": 8,
                "date": 1704067200,
                "chat": {CHAT},
                "from": {{"id": 42, "is_bot": true, "first_name": "doorman"}},
                "left_chat_member": {{"id": 5, "is_bot": false, "first_name": "Gone"}}
            }}"#
        ));
        let ev = from_service_message(&msg).expect("left notice normalizes");

        assert_eq!(ev.actor, Some(UserId(42)));
        assert_eq!(ev.subject, UserId(5));
        assert_eq!(ev.direction, Direction::Left);
        assert_eq!(ev.source, EventSource::MessageAnnotation);
        assert_eq!(ev.co_joined, 0);
    }

    #[test]
    fn ordinary_messages_produce_no_event() {
        let msg = message(&format!(
            r#"{{
                "message_id": 9,
                "date": 1704067200,
                "chat": {CHAT},
                "from": {{"id": 6, "is_bot": false, "first_name": "Chatter"}},
                "text": "hello"
            }}"#
        ));
        assert!(from_service_message(&msg).is_none());
    }

    #[test]
    fn status_update_maps_transition_and_direction() {
        let upd: ChatMemberUpdated = serde_json::from_str(&format!(
            r#"{{
                "chat": {CHAT},
                "from": {{"id": 1, "is_bot": false, "first_name": "Joiner"}},
                "date": 1704067200,
                "via_join_request": false,
                "via_chat_folder_invite_link": false,
                "old_chat_member": {{
                    "status": "left",
                    "user": {{"id": 1, "is_bot": false, "first_name": "Joiner"}}
                }},
                "new_chat_member": {{
                    "status": "member",
                    "user": {{"id": 1, "is_bot": false, "first_name": "Joiner"}}
                }}
            }}"#
        ))
        .expect("valid chat member update payload");

        let ev = from_status_update(&upd);
        assert_eq!(ev.actor, Some(UserId(1)));
        assert_eq!(ev.subject, UserId(1));
        assert_eq!(ev.direction, Direction::Joined);
        assert_eq!(ev.source, EventSource::StatusTransition);
        assert_eq!(
            ev.transition,
            Some(StatusChange {
                prior: MemberStatus::Left,
                new: MemberStatus::Member,
            })
        );
        assert_eq!(ev.message, None);
    }

    #[test]
    fn restricted_non_member_counts_as_out_of_group() {
        let upd: ChatMemberUpdated = serde_json::from_str(&format!(
            r#"{{
                "chat": {CHAT},
                "from": {{"id": 1, "is_bot": false, "first_name": "Joiner"}},
                "date": 1704067200,
                "via_join_request": false,
                "via_chat_folder_invite_link": false,
                "old_chat_member": {{
                    "status": "member",
                    "user": {{"id": 1, "is_bot": false, "first_name": "Joiner"}}
                }},
                "new_chat_member": {{
                    "status": "restricted",
                    "user": {{"id": 1, "is_bot": false, "first_name": "Joiner"}},
                    "is_member": false,
                    "until_date": 0,
                    "can_send_messages": false,
                    "can_send_media_messages": false,
                    "can_send_audios": false,
                    "can_send_documents": false,
                    "can_send_photos": false,
                    "can_send_videos": false,
                    "can_send_video_notes": false,
                    "can_send_voice_notes": false,
                    "can_send_polls": false,
                    "can_send_other_messages": false,
                    "can_add_web_page_previews": false,
                    "can_change_info": false,
                    "can_invite_users": false,
                    "can_pin_messages": false,
                    "can_manage_topics": false
                }}
            }}"#
        ))
        .expect("valid chat member update payload");

        let ev = from_status_update(&upd);
        assert_eq!(ev.direction, Direction::Left);
        assert_eq!(
            ev.transition.map(|t| t.new),
            Some(MemberStatus::Restricted { is_member: false })
        );
    }
}
