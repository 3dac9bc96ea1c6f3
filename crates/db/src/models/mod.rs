pub mod entitlement;
pub mod lesson;
