use serde::{Deserialize, Serialize};

/// Opaque lesson identifier from the content store.
pub type LessonId = String;

/// Opaque user identifier from the identity store.
pub type UserId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Identifier of the underlying video asset.
///
/// `Debug` is redacted and there is no `Display` impl, so the value cannot
/// end up in log fields by accident. Use [`VideoId::expose`] at the one
/// place that needs the raw identifier.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw identifier, for handing to a player or a response body.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("VideoId(<redacted>)")
    }
}
