//! Records read from the external content and identity stores, and the
//! caller identity the authorizer evaluates them against.

use serde::{Deserialize, Serialize};

use crate::types::{LessonId, Timestamp, UserId, VideoId};

/// Access-relevant projection of a lesson row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonAccessRecord {
    pub lesson_id: LessonId,
    pub video_id: VideoId,
    /// Entitlement is required to watch.
    pub is_premium: bool,
    /// `false` means unpublished; every request is refused.
    pub is_active: bool,
}

/// A user's subscription state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitlementRecord {
    pub user_id: UserId,
    pub is_active: bool,
    /// `None` means the entitlement does not expire.
    pub expiry_date: Option<Timestamp>,
}

impl EntitlementRecord {
    /// Whether this record grants premium access at `now`.
    ///
    /// The expiry instant itself is already outside the window.
    pub fn is_entitled(&self, now: Timestamp) -> bool {
        self.is_active && self.expiry_date.is_none_or(|expiry| now < expiry)
    }
}

/// Identity asserted for the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
    User(UserId),
    Anonymous,
}

impl Caller {
    pub fn user_id(&self) -> Option<&str> {
        match self {
            Caller::User(id) => Some(id),
            Caller::Anonymous => None,
        }
    }
}

/// Renders as `user:<id>` or `guest`; this is also the subject bound into
/// capability tokens.
impl std::fmt::Display for Caller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Caller::User(id) => write!(f, "user:{id}"),
            Caller::Anonymous => f.write_str("guest"),
        }
    }
}
