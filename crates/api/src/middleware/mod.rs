//! Request extractors.
//!
//! - [`auth::CallerIdentity`] -- resolves the caller from an optional JWT
//!   Bearer token; no header means an anonymous caller.

pub mod auth;
