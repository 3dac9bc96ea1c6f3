use std::sync::Arc;

use lessongate_core::authorization::VideoAuthorizer;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything inside is immutable and behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Video access gate with its injected lookups and signer.
    pub authorizer: Arc<VideoAuthorizer>,
}
