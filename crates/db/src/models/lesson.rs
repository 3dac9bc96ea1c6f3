//! Lesson row projection.

use lessongate_core::access::LessonAccessRecord;
use lessongate_core::types::VideoId;
use sqlx::FromRow;

/// The access-relevant columns of a `lessons` row.
///
/// Holds the raw video id -- convert with [`LessonAccessRow::into_record`]
/// before it travels further so it is wrapped in the redacting
/// [`VideoId`] type.
#[derive(Clone, FromRow)]
pub struct LessonAccessRow {
    pub id: String,
    pub video_id: String,
    pub is_premium: bool,
    pub is_active: bool,
}

impl LessonAccessRow {
    pub fn into_record(self) -> LessonAccessRecord {
        LessonAccessRecord {
            lesson_id: self.id,
            video_id: VideoId::new(self.video_id),
            is_premium: self.is_premium,
            is_active: self.is_active,
        }
    }
}
