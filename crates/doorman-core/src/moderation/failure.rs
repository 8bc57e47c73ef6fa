use super::port::{ApiError, ApiErrorCategory};

/// The four-way taxonomy every remote failure is reduced to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// Infrastructure-level and retry-worthy (timeout, rate limit, network).
    Transient,
    /// The bot lacks admin rights in that chat. Expected, not a bug.
    PermissionDenied,
    /// The desired end state was already reached (message gone, user gone,
    /// bot itself removed from the chat).
    AlreadyGone,
    /// Unexpected remote rejection; logged with full detail.
    Fatal,
}

/// Detail-text fragments the Bot API uses for "not allowed" failures.
const PERMISSION_DENIED_MARKERS: &[&str] = &[
    "chat_admin_required",
    "not enough rights",
];

/// Detail-text fragments for outcomes that already hold.
const ALREADY_GONE_MARKERS: &[&str] = &[
    "message can't be deleted",
    "message to delete not found",
    "bot was kicked from the group chat",
    "user not found",
    "already banned",
    "participant_id_invalid",
];

/// Map one remote failure into the taxonomy.
///
/// The structured category wins when the transport provides one; everything
/// the Bot API only distinguishes in prose is matched case-insensitively on
/// the detail text. Unmatched text is `Fatal`.
pub fn classify_failure(err: &ApiError) -> FailureKind {
    match err.category {
        ApiErrorCategory::RateLimited | ApiErrorCategory::Timeout | ApiErrorCategory::Network => {
            return FailureKind::Transient;
        }
        ApiErrorCategory::Authorization => return FailureKind::PermissionDenied,
        ApiErrorCategory::Api => {}
    }

    let detail = err.detail.to_lowercase();
    if PERMISSION_DENIED_MARKERS.iter().any(|m| detail.contains(m)) {
        return FailureKind::PermissionDenied;
    }
    if ALREADY_GONE_MARKERS.iter().any(|m| detail.contains(m)) {
        return FailureKind::AlreadyGone;
    }

    FailureKind::Fatal
}
