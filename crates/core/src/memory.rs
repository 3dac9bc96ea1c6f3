//! In-memory lookup store for tests and local development.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::access::{EntitlementRecord, LessonAccessRecord};
use crate::error::CoreError;
use crate::lookup::{EntitlementLookup, LessonLookup};

/// Lesson and entitlement records held in process memory.
///
/// Implements both lookup traits. [`InMemoryAccessStore::set_unavailable`]
/// makes every lookup fail, which simulates an unreachable backing store.
#[derive(Debug, Default)]
pub struct InMemoryAccessStore {
    lessons: RwLock<HashMap<String, LessonAccessRecord>>,
    entitlements: RwLock<HashMap<String, EntitlementRecord>>,
    unavailable: RwLock<bool>,
}

impl InMemoryAccessStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_lesson(&self, record: LessonAccessRecord) {
        let mut lessons = self.lessons.write().unwrap_or_else(|e| e.into_inner());
        lessons.insert(record.lesson_id.clone(), record);
    }

    pub fn insert_entitlement(&self, record: EntitlementRecord) {
        let mut entitlements = self.entitlements.write().unwrap_or_else(|e| e.into_inner());
        entitlements.insert(record.user_id.clone(), record);
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.write().unwrap_or_else(|e| e.into_inner()) = unavailable;
    }

    fn check_available(&self) -> Result<(), CoreError> {
        if *self.unavailable.read().unwrap_or_else(|e| e.into_inner()) {
            return Err(CoreError::Internal("access store unavailable".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl LessonLookup for InMemoryAccessStore {
    async fn get_lesson(&self, lesson_id: &str) -> Result<Option<LessonAccessRecord>, CoreError> {
        self.check_available()?;
        let lessons = self.lessons.read().unwrap_or_else(|e| e.into_inner());
        Ok(lessons.get(lesson_id).cloned())
    }

    async fn ping(&self) -> Result<(), CoreError> {
        self.check_available()
    }
}

#[async_trait]
impl EntitlementLookup for InMemoryAccessStore {
    async fn get_entitlement(
        &self,
        user_id: &str,
    ) -> Result<Option<EntitlementRecord>, CoreError> {
        self.check_available()?;
        let entitlements = self.entitlements.read().unwrap_or_else(|e| e.into_inner());
        Ok(entitlements.get(user_id).cloned())
    }
}
