//! Observable playback state and the notices shown to the user.

use std::time::Duration;

use lessongate_core::video_access::RefusalKind;
use tokio::time::Instant;

/// Snapshot of a controller's state, published on every transition.
///
/// Deliberately carries no video id, so it is safe to log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackState {
    /// No player; poster shown.
    Idle,
    /// One authorization request in flight.
    Authorizing { lesson_id: String },
    /// Player mounted until `started_at + expires_in`.
    Playing {
        lesson_id: String,
        started_at: Instant,
        expires_in: Duration,
    },
}

impl PlaybackState {
    pub fn is_idle(&self) -> bool {
        matches!(self, PlaybackState::Idle)
    }
}

/// User-facing message raised by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// The playback window elapsed.
    SessionExpired,
    /// Refused for lack of identity or subscription.
    SubscribeOrLogIn,
    /// Refused for a reason the user cannot act on.
    TryAgainLater,
}

impl Notice {
    /// Notice for a failed authorization.
    pub fn for_refusal(kind: RefusalKind) -> Self {
        match kind {
            RefusalKind::Unauthorized | RefusalKind::Forbidden => Notice::SubscribeOrLogIn,
            RefusalKind::NotFound | RefusalKind::InternalError | RefusalKind::InvalidRequest => {
                Notice::TryAgainLater
            }
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Notice::SessionExpired => "Your viewing session expired. Press play to watch again.",
            Notice::SubscribeOrLogIn => {
                "This lesson needs an active subscription. Log in or subscribe to watch it."
            }
            Notice::TryAgainLater => "The video could not be loaded. Please try again later.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entitlement_refusals_ask_to_subscribe() {
        assert_eq!(Notice::for_refusal(RefusalKind::Unauthorized), Notice::SubscribeOrLogIn);
        assert_eq!(Notice::for_refusal(RefusalKind::Forbidden), Notice::SubscribeOrLogIn);
    }

    #[test]
    fn other_refusals_ask_to_retry_later() {
        assert_eq!(Notice::for_refusal(RefusalKind::NotFound), Notice::TryAgainLater);
        assert_eq!(Notice::for_refusal(RefusalKind::InternalError), Notice::TryAgainLater);
        assert_eq!(Notice::for_refusal(RefusalKind::InvalidRequest), Notice::TryAgainLater);
    }
}
