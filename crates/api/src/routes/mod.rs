pub mod health;
pub mod video;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /videos/authorize                                authorize playback (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/videos", video::router())
}
