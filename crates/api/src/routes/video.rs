//! Route definitions for the `/videos` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::video_access;
use crate::state::AppState;

/// Routes mounted at `/videos`.
///
/// ```text
/// POST /authorize  -> authorize_video (identity optional)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/authorize", post(video_access::authorize_video))
}
