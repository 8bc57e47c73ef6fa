use tracing::info;

use crate::domain::UserId;

use super::types::{Action, Direction, EventSource, MembershipEvent};

/// Decide what, if anything, to do about one membership event.
///
/// Deterministic and side-effect-free apart from the decision log line. The
/// policy is the strict one: only self-joins are evicted; users added by
/// someone else stay, and bulk-add notices get message cleanup only.
pub fn classify(bot: UserId, ev: &MembershipEvent) -> Action {
    let (action, rule) = decide(bot, ev);
    info!(
        "[{}] {}: {rule}",
        ev.chat.id.0,
        ev.chat.title_or_default(),
    );
    action
}

fn decide(bot: UserId, ev: &MembershipEvent) -> (Action, &'static str) {
    // The bot never acts on its own membership changes, whatever else the
    // event says.
    if ev.subject == bot {
        return (Action::None, "ignoring own membership change");
    }

    match (ev.source, ev.direction) {
        (EventSource::MessageAnnotation, Direction::Joined) => {
            let Some(message) = ev.message else {
                return (Action::None, "join notice without a message");
            };

            if ev.co_joined > 0 {
                // Several users in one notice is a third-party bulk add:
                // clean up the notice, keep the users.
                return (
                    Action::DeleteMessage { message },
                    "bulk add notice: cleanup only",
                );
            }

            if ev.actor != Some(ev.subject) {
                return (Action::None, "added by someone else: keeping");
            }

            (
                Action::EvictAndDelete {
                    chat: ev.chat.id,
                    subject: ev.subject,
                    message,
                },
                "self-join notice: kickout + cleanup",
            )
        }

        (EventSource::MessageAnnotation, Direction::Left) => {
            // Only clean up after the bot's own evictions; a removal by a
            // human admin keeps its audit trail.
            match ev.message {
                Some(message) if ev.actor == Some(bot) => (
                    Action::DeleteMessage { message },
                    "left notice from own eviction: cleanup",
                ),
                _ => (Action::None, "left notice: keeping audit trail"),
            }
        }

        (EventSource::StatusTransition, Direction::Joined) => {
            let Some(tr) = ev.transition else {
                return (Action::None, "status join without transition data");
            };

            let fresh_join = tr.prior.out_of_group() && tr.new.joined_group();
            let self_initiated = ev.actor == Some(ev.subject);

            if fresh_join && self_initiated {
                (
                    Action::Evict {
                        chat: ev.chat.id,
                        subject: ev.subject,
                    },
                    "self-initiated join: kickout",
                )
            } else {
                (Action::None, "status change is not a fresh self-join")
            }
        }

        (EventSource::StatusTransition, Direction::Left) => {
            (Action::None, "status left: no action")
        }
    }
}
