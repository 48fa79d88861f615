//! Plugin bridge surface
//!
//! Everything the webview-facing bridge layer touches: load-time options
//! parsed from JSON, the `tracksChanged` event payload, and the command
//! channel that marshals cross-thread calls onto the single player task.
//!
//! Bridge calls arrive on whatever thread the host framework uses for IPC;
//! the engine handle must only ever be touched from its own thread. The
//! `PlayerHandle` / `run_player` pair enforces that boundary: handles are
//! cheap clones that enqueue commands, and exactly one task consumes them.

use serde::Deserialize;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use uuid::Uuid;

use crate::config::Config;
use crate::models::SelectionRequest;
use crate::player::engine::{MediaEngine, RawTrackReport};
use crate::player::PlaybackController;

/// Event name the bridge publishes track changes under
pub const TRACKS_CHANGED_EVENT: &str = "tracksChanged";

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum BridgeError {
    /// The player task stopped; the media item is gone with it
    #[error("player task is no longer running")]
    PlayerClosed,
    #[error("malformed load options: {0}")]
    MalformedOptions(#[from] serde_json::Error),
}

// =============================================================================
// Load Options
// =============================================================================

/// Recognized load-time options, all defaulting to `""` when omitted.
///
/// Mirrors the wire shape the webview sends; unknown keys are ignored and
/// null never reaches the selection core.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoadOptions {
    pub subtitle_track_id: String,
    pub subtitle_locale: String,
    pub audio_track_id: String,
    pub audio_locale: String,
    pub preferred_locale: String,
}

impl LoadOptions {
    /// Parse options from the bridge's JSON call payload
    pub fn from_json(json: &str) -> Result<Self, BridgeError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolve into the immutable request captured for this media item,
    /// filling unspecified fields from the config defaults.
    pub fn into_request(self, defaults: &Config) -> SelectionRequest {
        let preferred_locale = if self.preferred_locale.is_empty() {
            defaults.preferred_locale.clone().unwrap_or_default()
        } else {
            self.preferred_locale
        };
        let subtitle_locale = if self.subtitle_locale.is_empty() {
            defaults.default_subtitle_locale.clone().unwrap_or_default()
        } else {
            self.subtitle_locale
        };

        SelectionRequest {
            subtitle_track_id: self.subtitle_track_id,
            subtitle_locale,
            audio_track_id: self.audio_track_id,
            audio_locale: self.audio_locale,
            preferred_locale,
        }
    }
}

// =============================================================================
// Player Commands
// =============================================================================

/// Commands marshaled onto the player task
#[derive(Debug)]
pub enum PlayerCommand {
    /// Load a media item with the caller's track options
    Load {
        options: LoadOptions,
        /// Receives the session id callbacks for this item must carry
        reply: oneshot::Sender<Uuid>,
    },
    /// First playback-ready signal from the engine
    Ready,
    /// Engine track-change callback, fenced by session id
    TracksChanged {
        session: Uuid,
        report: RawTrackReport,
    },
    /// Tear down the current media item
    Release,
}

/// Cloneable, thread-safe front for the player task.
///
/// All methods merely enqueue; ordering is preserved per handle and the
/// engine is only ever touched by the consuming task.
#[derive(Debug, Clone)]
pub struct PlayerHandle {
    tx: mpsc::UnboundedSender<PlayerCommand>,
}

impl PlayerHandle {
    /// Load a media item and wait for its session id
    pub async fn load(&self, options: LoadOptions) -> Result<Uuid, BridgeError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(PlayerCommand::Load { options, reply })
            .map_err(|_| BridgeError::PlayerClosed)?;
        rx.await.map_err(|_| BridgeError::PlayerClosed)
    }

    /// Forward the engine's playback-ready signal
    pub fn notify_ready(&self) -> Result<(), BridgeError> {
        self.tx
            .send(PlayerCommand::Ready)
            .map_err(|_| BridgeError::PlayerClosed)
    }

    /// Forward an engine track-change callback
    pub fn notify_tracks_changed(
        &self,
        session: Uuid,
        report: RawTrackReport,
    ) -> Result<(), BridgeError> {
        self.tx
            .send(PlayerCommand::TracksChanged { session, report })
            .map_err(|_| BridgeError::PlayerClosed)
    }

    /// Tear down the current media item
    pub fn release(&self) -> Result<(), BridgeError> {
        self.tx
            .send(PlayerCommand::Release)
            .map_err(|_| BridgeError::PlayerClosed)
    }
}

/// Create the handle/receiver pair for one player task
pub fn player_channel() -> (PlayerHandle, mpsc::UnboundedReceiver<PlayerCommand>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (PlayerHandle { tx }, rx)
}

/// Drive one playback controller from a command stream.
///
/// This is the UI-affine execution context: it owns the controller (and with
/// it the engine handle) for its whole life and processes commands strictly
/// in order. Runs until every `PlayerHandle` is dropped.
pub async fn run_player<E: MediaEngine>(
    mut controller: PlaybackController<E>,
    mut commands: mpsc::UnboundedReceiver<PlayerCommand>,
    defaults: Config,
) {
    while let Some(command) = commands.recv().await {
        match command {
            PlayerCommand::Load { options, reply } => {
                let session = controller.load(options.into_request(&defaults));
                // Caller may have given up waiting; the load still happened
                let _ = reply.send(session);
            }
            PlayerCommand::Ready => controller.notify_ready(),
            PlayerCommand::TracksChanged { session, report } => {
                controller.notify_tracks_changed(session, &report);
            }
            PlayerCommand::Release => controller.release(),
        }
    }
}
