//! Playback client for authorized lesson video.
//!
//! - [`client`] -- requests a capability from the authorization endpoint.
//! - [`controller`] -- the `Idle → Authorizing → Playing → Idle` state
//!   machine that mounts a player for a bounded window and tears it down.
//! - [`surface`] -- the rendering seam the embedding UI implements.
//! - [`state`] -- observable state and user-facing notices.

pub mod client;
pub mod config;
pub mod controller;
pub mod state;
pub mod surface;

pub use client::{AuthorizeError, AuthorizeVideo, HttpAuthorizeClient, PlaybackGrant};
pub use config::PlaybackConfig;
pub use controller::{PlayOutcome, PlaybackController};
pub use state::{Notice, PlaybackState};
pub use surface::{PlayerMount, PlayerSurface, PresentationPolicy};
