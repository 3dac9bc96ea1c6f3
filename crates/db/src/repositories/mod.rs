pub mod entitlement_repo;
pub mod lesson_repo;

pub use entitlement_repo::EntitlementRepo;
pub use lesson_repo::LessonRepo;
