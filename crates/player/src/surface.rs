//! Rendering seam between the controller and the embedding UI.

use lessongate_core::types::VideoId;

use crate::state::Notice;

/// Deterrents applied to the mounted player.
///
/// These discourage casual copying of the video id; they are not a
/// security boundary. The default suppresses both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PresentationPolicy {
    pub allow_context_menu: bool,
    pub allow_drag: bool,
}

/// Everything a surface needs to mount a player.
#[derive(Debug)]
pub struct PlayerMount<'a> {
    pub lesson_id: &'a str,
    pub video_id: &'a VideoId,
    pub presentation: PresentationPolicy,
}

/// The UI that renders the poster, busy indicator, player and notices.
///
/// All methods are called synchronously while the controller holds its
/// state lock, so a surface must not call back into the controller.
///
/// Contract for implementors:
///
/// - The video id given to [`mount_player`](PlayerSurface::mount_player)
///   may be held only until [`destroy_player`](PlayerSurface::destroy_player)
///   returns; after that no rendered element may reference it.
/// - The video id must never be written to client storage or placed in a
///   URL the user can bookmark or share.
pub trait PlayerSurface: Send + 'static {
    fn show_poster(&mut self);
    fn show_busy(&mut self);
    fn mount_player(&mut self, mount: PlayerMount<'_>);
    fn destroy_player(&mut self);
    fn show_notice(&mut self, notice: Notice);
}
