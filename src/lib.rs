//! trackbridge - track and locale negotiation for a player bridge
//!
//! The decision core of a webview-to-native video player plugin: given the
//! tracks a media item exposes, the caller's explicit track/locale choices,
//! and a device-preferred locale, decide deterministically which audio track
//! plays and which subtitle track (if any) is shown, and report engine-side
//! track changes as normalized events.
//!
//! # Modules
//!
//! - `models` - Tracks, catalogs, selection requests/results, events
//! - `player` - Engine seam, catalog builder, selector, notifier, controller
//! - `bridge` - Plugin-facing options, payloads, and the player task channel
//! - `config` - Config-file defaults for omitted load options
//! - `cli` / `commands` - Offline capture-replay CLI

pub mod bridge;
pub mod cli;
pub mod commands;
pub mod config;
pub mod models;
pub mod player;

// Re-export commonly used types
pub use models::{
    SelectionRequest, SelectionResult, SubtitleStatus, Track, TrackAttributes, TrackCatalog,
    TrackType, TracksChangedEvent, DISABLED_TRACK_ID,
};

pub use bridge::{LoadOptions, PlayerHandle, TRACKS_CHANGED_EVENT};
pub use player::{build_catalog, select, MediaEngine, PlaybackController, RawTrackReport};
