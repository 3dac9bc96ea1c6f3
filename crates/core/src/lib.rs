//! Domain core for lesson video access.
//!
//! Pure logic with no HTTP or database dependencies:
//!
//! - [`authorization`] -- the [`VideoAuthorizer`](authorization::VideoAuthorizer)
//!   that decides whether a caller may watch a lesson video.
//! - [`access`] -- lesson and entitlement records, caller identity.
//! - [`capability`] -- minted capabilities and the token signer seam.
//! - [`lookup`] -- traits for the external lesson and entitlement stores.
//! - [`video_access`] -- the JSON wire contract shared with the player.

pub mod access;
pub mod audit;
pub mod authorization;
pub mod capability;
pub mod error;
pub mod hashing;
pub mod lookup;
pub mod memory;
pub mod types;
pub mod video_access;
