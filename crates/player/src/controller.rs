//! Playback state machine.
//!
//! ```text
//! Idle ──play──▶ Authorizing ──grant──▶ Playing ──timer──▶ (TimedOut) ─▶ Idle
//!                     │                    │
//!                     └──refusal──▶ Idle   └──stop / drop──▶ (Stopped) ─▶ Idle
//! ```
//!
//! Dropping a `play` future before its response arrives also returns the
//! controller to `Idle`, so the next play action sends a fresh request.
//!
//! A controller owns one player surface. At most one authorization is in
//! flight and at most one session (with its single teardown timer) is live
//! at a time.
//!
//! All state sits behind one `std::sync::Mutex` that is never held across
//! an `.await`. An epoch counter is bumped whenever a new authorization
//! starts or an in-flight one is abandoned; late responses and timers
//! carrying an old epoch are ignored.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use lessongate_core::types::VideoId;
use tokio::sync::watch;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::client::AuthorizeVideo;
use crate::state::{Notice, PlaybackState};
use crate::surface::{PlayerMount, PlayerSurface, PresentationPolicy};

/// Result of a [`PlaybackController::play`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayOutcome {
    /// A player was mounted.
    Started,
    /// Another authorization was already in flight; nothing was sent.
    Ignored,
    /// The server refused or could not be reached; the notice was shown.
    Refused(Notice),
    /// The controller was stopped while the request was in flight; the
    /// response was dropped without mounting anything.
    Discarded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TeardownReason {
    TimedOut,
    Stopped,
}

/// A mounted player and its teardown timer.
struct PlaybackSession {
    lesson_id: String,
    video_id: VideoId,
    started_at: Instant,
    expires_in: Duration,
    timer: CancellationToken,
    epoch: u64,
}

enum Phase {
    Idle,
    Authorizing { lesson_id: String },
    Playing(PlaybackSession),
}

struct Inner<S> {
    surface: S,
    phase: Phase,
    epoch: u64,
}

struct Shared<C, S> {
    client: C,
    presentation: PresentationPolicy,
    inner: Mutex<Inner<S>>,
    state_tx: watch::Sender<PlaybackState>,
}

/// Drives one player instance.
///
/// Dropping the controller tears down any live session, like a component
/// unmount.
pub struct PlaybackController<C, S>
where
    C: AuthorizeVideo + 'static,
    S: PlayerSurface,
{
    shared: Arc<Shared<C, S>>,
}

impl<C, S> PlaybackController<C, S>
where
    C: AuthorizeVideo + 'static,
    S: PlayerSurface,
{
    pub fn new(client: C, surface: S) -> Self {
        Self::with_presentation(client, surface, PresentationPolicy::default())
    }

    pub fn with_presentation(client: C, mut surface: S, presentation: PresentationPolicy) -> Self {
        let (state_tx, _) = watch::channel(PlaybackState::Idle);
        surface.show_poster();

        Self {
            shared: Arc::new(Shared {
                client,
                presentation,
                inner: Mutex::new(Inner {
                    surface,
                    phase: Phase::Idle,
                    epoch: 0,
                }),
                state_tx,
            }),
        }
    }

    /// Current state.
    pub fn state(&self) -> PlaybackState {
        self.shared.state_tx.borrow().clone()
    }

    /// Receiver notified on every state transition.
    pub fn subscribe(&self) -> watch::Receiver<PlaybackState> {
        self.shared.state_tx.subscribe()
    }

    /// Handle a user's play action for `lesson_id`.
    ///
    /// Issues exactly one authorization request unless one is already in
    /// flight, in which case the call is ignored. Playing a new session
    /// while one is live replaces it.
    pub async fn play(&self, lesson_id: &str) -> PlayOutcome {
        let epoch = {
            let mut inner = self.shared.lock();
            if matches!(inner.phase, Phase::Authorizing { .. }) {
                tracing::debug!(lesson_id, "Play ignored, authorization already in flight");
                return PlayOutcome::Ignored;
            }

            self.shared.teardown(&mut inner, TeardownReason::Stopped);

            inner.epoch += 1;
            inner.phase = Phase::Authorizing {
                lesson_id: lesson_id.to_string(),
            };
            inner.surface.show_busy();
            self.shared.publish(&inner);
            inner.epoch
        };

        tracing::debug!(lesson_id, "Requesting playback authorization");
        let pending = PendingAuthorization {
            shared: &*self.shared,
            epoch,
            armed: true,
        };
        let result = self.shared.client.authorize(lesson_id).await;
        pending.disarm();

        let mut inner = self.shared.lock();
        if inner.epoch != epoch || !matches!(inner.phase, Phase::Authorizing { .. }) {
            tracing::debug!(lesson_id, "Authorization result discarded after stop");
            return PlayOutcome::Discarded;
        }

        match result {
            Ok(grant) => {
                let timer = CancellationToken::new();
                let session = PlaybackSession {
                    lesson_id: lesson_id.to_string(),
                    video_id: grant.video_id,
                    started_at: Instant::now(),
                    expires_in: grant.expires_in,
                    timer: timer.clone(),
                    epoch,
                };

                inner.surface.mount_player(PlayerMount {
                    lesson_id,
                    video_id: &session.video_id,
                    presentation: self.shared.presentation,
                });
                spawn_teardown_timer(Arc::downgrade(&self.shared), timer, grant.expires_in, epoch);

                tracing::debug!(
                    lesson_id,
                    expires_in_secs = grant.expires_in.as_secs(),
                    "Playback started"
                );
                inner.phase = Phase::Playing(session);
                self.shared.publish(&inner);
                PlayOutcome::Started
            }
            Err(err) => {
                let notice = Notice::for_refusal(err.refusal_kind());
                tracing::info!(lesson_id, error = %err, "Playback authorization failed");

                inner.phase = Phase::Idle;
                inner.surface.show_poster();
                inner.surface.show_notice(notice);
                self.shared.publish(&inner);
                PlayOutcome::Refused(notice)
            }
        }
    }

    /// Tear down silently: navigation away or component unmount.
    ///
    /// Idempotent. A stop during `Authorizing` abandons the in-flight
    /// request.
    pub fn stop(&self) {
        let mut inner = self.shared.lock();
        self.shared.teardown(&mut inner, TeardownReason::Stopped);
    }
}

impl<C, S> Drop for PlaybackController<C, S>
where
    C: AuthorizeVideo + 'static,
    S: PlayerSurface,
{
    fn drop(&mut self) {
        self.stop();
    }
}

impl<C, S> Shared<C, S>
where
    C: AuthorizeVideo + 'static,
    S: PlayerSurface,
{
    fn lock(&self) -> MutexGuard<'_, Inner<S>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, inner: &Inner<S>) {
        let state = match &inner.phase {
            Phase::Idle => PlaybackState::Idle,
            Phase::Authorizing { lesson_id } => PlaybackState::Authorizing {
                lesson_id: lesson_id.clone(),
            },
            Phase::Playing(session) => PlaybackState::Playing {
                lesson_id: session.lesson_id.clone(),
                started_at: session.started_at,
                expires_in: session.expires_in,
            },
        };
        self.state_tx.send_replace(state);
    }

    /// Destroy the player, drop the video id and cancel the timer.
    fn teardown(&self, inner: &mut Inner<S>, reason: TeardownReason) {
        match std::mem::replace(&mut inner.phase, Phase::Idle) {
            Phase::Idle => return,
            Phase::Authorizing { lesson_id } => {
                inner.epoch += 1;
                tracing::debug!(lesson_id, "Authorization abandoned");
            }
            Phase::Playing(session) => {
                session.timer.cancel();
                inner.surface.destroy_player();
                tracing::debug!(lesson_id = %session.lesson_id, ?reason, "Playback torn down");
            }
        }

        inner.surface.show_poster();
        if reason == TeardownReason::TimedOut {
            inner.surface.show_notice(Notice::SessionExpired);
        }
        self.publish(inner);
    }

    /// Timer callback. Ignored unless the session that armed it is still
    /// the live one.
    fn expire(&self, epoch: u64) {
        let mut inner = self.lock();
        let current = matches!(&inner.phase, Phase::Playing(session) if session.epoch == epoch);
        if current {
            self.teardown(&mut inner, TeardownReason::TimedOut);
        }
    }
}

/// Returns the controller to `Idle` if a `play` future is dropped while its
/// authorization is still in flight.
struct PendingAuthorization<'a, C, S>
where
    C: AuthorizeVideo + 'static,
    S: PlayerSurface,
{
    shared: &'a Shared<C, S>,
    epoch: u64,
    armed: bool,
}

impl<C, S> PendingAuthorization<'_, C, S>
where
    C: AuthorizeVideo + 'static,
    S: PlayerSurface,
{
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<C, S> Drop for PendingAuthorization<'_, C, S>
where
    C: AuthorizeVideo + 'static,
    S: PlayerSurface,
{
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        let mut inner = self.shared.lock();
        let lesson_id = match &inner.phase {
            Phase::Authorizing { lesson_id } if inner.epoch == self.epoch => lesson_id.clone(),
            _ => return,
        };

        tracing::debug!(lesson_id = %lesson_id, "Play cancelled before authorization finished");
        inner.epoch += 1;
        inner.phase = Phase::Idle;
        inner.surface.show_poster();
        self.shared.publish(&inner);
    }
}

fn spawn_teardown_timer<C, S>(
    shared: Weak<Shared<C, S>>,
    cancel: CancellationToken,
    expires_in: Duration,
    epoch: u64,
) where
    C: AuthorizeVideo + 'static,
    S: PlayerSurface,
{
    tokio::spawn(async move {
        tokio::select! {
            _ = cancel.cancelled() => {}
            _ = tokio::time::sleep(expires_in) => {
                if let Some(shared) = shared.upgrade() {
                    shared.expire(epoch);
                }
            }
        }
    });
}
