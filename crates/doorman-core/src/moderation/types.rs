use crate::domain::{ChatId, ChatRef, MessageRef, UserId};

use super::failure::FailureKind;

/// A member's standing in a chat, as reported by a status-transition update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemberStatus {
    NotMember,
    Left,
    Banned,
    Restricted { is_member: bool },
    Member,
    Administrator,
    Owner,
}

impl MemberStatus {
    /// "Not effectively in the group": the states a genuine join departs from.
    pub fn out_of_group(self) -> bool {
        matches!(
            self,
            MemberStatus::NotMember
                | MemberStatus::Left
                | MemberStatus::Banned
                | MemberStatus::Restricted { is_member: false }
        )
    }

    /// "Now in the group" for join purposes. Administrator/Owner are excluded:
    /// a promotion is never a join.
    pub fn joined_group(self) -> bool {
        matches!(
            self,
            MemberStatus::Member | MemberStatus::Restricted { is_member: true }
        )
    }

    /// Present in the chat in any capacity. Used by the normalizer to derive
    /// a direction; the classifier applies the stricter join invariant.
    pub fn in_group(self) -> bool {
        self.joined_group()
            || matches!(self, MemberStatus::Administrator | MemberStatus::Owner)
    }
}

impl std::fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MemberStatus::NotMember => "not-member",
            MemberStatus::Left => "left",
            MemberStatus::Banned => "banned",
            MemberStatus::Restricted { is_member: true } => "restricted(member)",
            MemberStatus::Restricted { is_member: false } => "restricted(non-member)",
            MemberStatus::Member => "member",
            MemberStatus::Administrator => "administrator",
            MemberStatus::Owner => "owner",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Joined,
    Left,
}

/// Which update channel produced an event. Both channels can fire for the
/// same logical transition; processing stays idempotent instead of deduped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventSource {
    MessageAnnotation,
    StatusTransition,
}

/// Prior/new status pair carried by status-transition events.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusChange {
    pub prior: MemberStatus,
    pub new: MemberStatus,
}

/// Canonical representation of one membership transition, normalized from
/// either a native status-transition update or a join/left service message.
#[derive(Clone, Debug)]
pub struct MembershipEvent {
    pub chat: ChatRef,
    /// Who caused the transition: the inviter, the user themself, or the
    /// sender of the service message. `None` when the transport gave no actor.
    pub actor: Option<UserId>,
    /// The user whose membership changed. Never the empty/zero user.
    pub subject: UserId,
    pub direction: Direction,
    pub source: EventSource,
    /// Present only for `EventSource::StatusTransition`.
    pub transition: Option<StatusChange>,
    /// The service message to clean up, present only for
    /// `EventSource::MessageAnnotation`.
    pub message: Option<MessageRef>,
    /// How many further users were listed in the same join notice (a bulk
    /// add); 0 for a lone join.
    pub co_joined: usize,
}

/// Decision output of the classifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    None,
    Evict {
        chat: ChatId,
        subject: UserId,
    },
    DeleteMessage {
        message: MessageRef,
    },
    EvictAndDelete {
        chat: ChatId,
        subject: UserId,
        message: MessageRef,
    },
}

/// Result of one remote API call after classification and retry policy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RemoteCallOutcome {
    Success,
    Failed { kind: FailureKind, detail: String },
}
