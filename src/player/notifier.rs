//! Change notification
//!
//! Watches catalog replacements and publishes normalized `tracksChanged`
//! events, and owns the per-media-item phase machine that gates the one
//! automatic selection pass.
//!
//! The design is deliberately one-shot-then-observe: initial track binding
//! is explicit and request-driven on the first ready transition, while later
//! catalog churn (ABR switches, late manifest metadata) is merely reported,
//! never re-decided.

use tokio::sync::broadcast;
use tracing::debug;

use crate::models::{SubtitleStatus, TrackCatalog, TrackType, TracksChangedEvent};

/// Buffered events per subscriber; laggards lose oldest events rather than
/// ever blocking the player task.
const EVENT_BUFFER: usize = 16;

/// Per-media-item lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerPhase {
    /// No media item loaded
    #[default]
    Uninitialized,
    /// Item loaded, selection pass pending the first ready signal
    AwaitingFirstReady,
    /// Selection applied; catalog changes are observational from here on
    Active,
}

/// Observes track-list changes and fans out normalized events.
pub struct ChangeNotifier {
    phase: PlayerPhase,
    events: broadcast::Sender<TracksChangedEvent>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        Self {
            phase: PlayerPhase::Uninitialized,
            events,
        }
    }

    pub fn phase(&self) -> PlayerPhase {
        self.phase
    }

    /// New listener for `tracksChanged` events
    pub fn subscribe(&self) -> broadcast::Receiver<TracksChangedEvent> {
        self.events.subscribe()
    }

    /// A media item was loaded; arm the one-shot selection pass
    pub fn mark_loaded(&mut self) {
        self.phase = PlayerPhase::AwaitingFirstReady;
    }

    /// The media item was torn down
    pub fn reset(&mut self) {
        self.phase = PlayerPhase::Uninitialized;
    }

    /// Record a ready signal. Returns true exactly once per loaded item, on
    /// the `AwaitingFirstReady → Active` transition that triggers selection.
    pub fn on_ready(&mut self) -> bool {
        match self.phase {
            PlayerPhase::AwaitingFirstReady => {
                self.phase = PlayerPhase::Active;
                true
            }
            // Ready without a load, or a duplicate ready: nothing to do
            PlayerPhase::Uninitialized | PlayerPhase::Active => false,
        }
    }

    /// Publish the observational event for a fresh catalog snapshot
    pub fn publish(&self, catalog: &TrackCatalog) {
        let event = shape_event(catalog);
        debug!(
            subscribers = self.events.receiver_count(),
            subtitles_disabled = event.subtitle_track.is_disabled(),
            "publishing tracksChanged"
        );
        // Send only fails with zero subscribers, which is fine
        let _ = self.events.send(event);
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Shape the public event from a catalog snapshot.
///
/// Reports the engine's own selection flags, not the selector's output; the
/// two can disagree while the engine is still applying an instruction. No
/// selected text track maps to the disabled sentinel so bridge listeners
/// always see an explicit subtitle state.
pub fn shape_event(catalog: &TrackCatalog) -> TracksChangedEvent {
    let audio_track = catalog.selected(TrackType::Audio).map(Into::into);
    let subtitle_track = catalog
        .selected(TrackType::Text)
        .map(|t| SubtitleStatus::Track(t.into()))
        .unwrap_or_else(SubtitleStatus::disabled);

    TracksChangedEvent {
        audio_track,
        subtitle_track,
    }
}
