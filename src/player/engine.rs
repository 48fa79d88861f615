//! Media engine seam
//!
//! The native playback engine (and the cast receiver behind it) is an
//! external collaborator. This module defines the narrow trait the player
//! core talks through, plus the raw track-group report shape the engine
//! hands back. Everything here is synchronous: every call happens on the
//! single UI-affine player task, mirroring the engine's own threading rule.

use serde::{Deserialize, Serialize};

use crate::models::TrackType;

// =============================================================================
// Raw Track Report
// =============================================================================

/// One track as the engine reports it, before normalization.
///
/// All metadata is optional; manifests frequently omit ids and language tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTrack {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub codec: Option<String>,
    #[serde(default)]
    pub bitrate: Option<i32>,
    #[serde(default)]
    pub channel_count: Option<i32>,
    #[serde(default)]
    pub sample_rate: Option<i32>,
    #[serde(default)]
    pub container_mime_type: Option<String>,
    /// Whether the engine currently has this track selected
    #[serde(default)]
    pub selected: bool,
}

/// One typed group of tracks from the engine's report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTrackGroup {
    pub track_type: TrackType,
    pub tracks: Vec<RawTrack>,
}

/// The engine's full track-group report for the active media item.
///
/// Group and track order is meaningful: the catalog preserves it and the
/// selector breaks ties with it. Serializable so reports captured from
/// devices can be replayed through the CLI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTrackReport {
    pub groups: Vec<RawTrackGroup>,
}

impl RawTrackReport {
    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|g| g.tracks.is_empty())
    }
}

// =============================================================================
// MediaEngine Trait
// =============================================================================

/// The playback engine the controller drives.
///
/// Mutators are declarative language preferences rather than track ids: the
/// engine owns final track binding and resolves it from these hints. None of
/// these calls may block; implementations forward straight to the native
/// player on the same thread.
pub trait MediaEngine {
    /// Snapshot the engine's current track-group report
    fn current_tracks(&self) -> RawTrackReport;

    /// Prefer the given language for audio renditions
    fn set_preferred_audio_language(&mut self, lang: &str);

    /// Prefer the given language for text renditions
    fn set_preferred_text_language(&mut self, lang: &str);

    /// Turn text rendering off entirely
    fn disable_text_track_selection(&mut self);
}
