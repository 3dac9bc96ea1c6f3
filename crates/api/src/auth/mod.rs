//! Token primitives.
//!
//! - [`jwt`] -- identity access tokens issued by the identity service.
//! - [`capability`] -- capability tokens minted for granted video access.

pub mod capability;
pub mod jwt;
