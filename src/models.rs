//! Data structures and types for trackbridge
//!
//! Contains all shared models used across the crate organized by domain:
//! - **Tracks**: individual audio/text tracks and catalog snapshots
//! - **Selection**: caller intent and the computed selection instruction
//! - **Events**: normalized track-change payloads published to the bridge

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel track id meaning "force subtitles off".
///
/// Distinguished from ordinary ids by convention, not by type; any other
/// spelling is treated as a normal (non-matching) id.
pub const DISABLED_TRACK_ID: &str = "#disabled";

// =============================================================================
// Track Models
// =============================================================================

/// Track kind discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackType {
    Audio,
    Text,
}

impl fmt::Display for TrackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackType::Audio => write!(f, "audio"),
            TrackType::Text => write!(f, "text"),
        }
    }
}

/// One selectable audio or text stream within a media item.
///
/// Immutable once constructed; one instance per track the engine reports.
/// Every attribute except the type is optional; manifests routinely omit
/// ids, language tags, and codec metadata, and a track missing all of them
/// is still a valid catalog member (it just never matches by id or locale).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: Option<String>,
    pub track_type: TrackType,
    /// BCP-47 tag or bare 3-letter code, as reported by the engine
    pub language: Option<String>,
    pub label: Option<String>,
    pub codec: Option<String>,
    pub bitrate: Option<i32>,
    pub channel_count: Option<i32>,
    pub sample_rate: Option<i32>,
    pub container_mime_type: Option<String>,
    /// The engine's own is-selected flag, captured at snapshot time
    pub selected: bool,
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.id.as_deref().unwrap_or("-");
        let lang = self.language.as_deref().unwrap_or("und");
        write!(f, "[{}] {} ({})", self.track_type, id, lang)?;
        if self.selected {
            write!(f, " *")?;
        }
        Ok(())
    }
}

/// Read-only snapshot of every track known for the active media item.
///
/// Rebuilt wholesale on each engine track-change callback, never mutated in
/// place. Order is whatever order the engine reported; selection logic relies
/// on it for first-match tie-breaking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackCatalog {
    tracks: Vec<Track>,
}

impl TrackCatalog {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// All tracks in engine report order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Tracks of one type in engine report order
    pub fn of_type(&self, track_type: TrackType) -> impl Iterator<Item = &Track> {
        self.tracks
            .iter()
            .filter(move |t| t.track_type == track_type)
    }

    /// Audio tracks in engine report order
    pub fn audio_tracks(&self) -> impl Iterator<Item = &Track> {
        self.of_type(TrackType::Audio)
    }

    /// Text tracks in engine report order
    pub fn text_tracks(&self) -> impl Iterator<Item = &Track> {
        self.of_type(TrackType::Text)
    }

    /// The track of the given type the engine currently has selected, if any
    pub fn selected(&self, track_type: TrackType) -> Option<&Track> {
        self.tracks
            .iter()
            .find(|t| t.track_type == track_type && t.selected)
    }
}

// =============================================================================
// Selection Models
// =============================================================================

/// Caller intent, captured once per media item load and immutable thereafter.
///
/// Empty string means "unspecified": a legal sentinel, not an absence. The
/// bridge layer guarantees these fields are never null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionRequest {
    #[serde(default)]
    pub subtitle_track_id: String,
    #[serde(default)]
    pub subtitle_locale: String,
    #[serde(default)]
    pub audio_track_id: String,
    #[serde(default)]
    pub audio_locale: String,
    #[serde(default)]
    pub preferred_locale: String,
}

impl SelectionRequest {
    /// True when no field expresses any intent
    pub fn is_empty(&self) -> bool {
        self.subtitle_track_id.is_empty()
            && self.subtitle_locale.is_empty()
            && self.audio_track_id.is_empty()
            && self.audio_locale.is_empty()
            && self.preferred_locale.is_empty()
    }

    /// True when the caller asked for subtitles to be forced off
    pub fn subtitles_forced_off(&self) -> bool {
        self.subtitle_track_id == DISABLED_TRACK_ID
    }
}

/// Declarative selection instruction computed by the selector.
///
/// Languages rather than track references: the engine resolves final track
/// binding by language preference, not by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionResult {
    pub audio_language_to_prefer: Option<String>,
    pub subtitle_language_to_prefer: Option<String>,
    pub subtitles_disabled: bool,
}

impl SelectionResult {
    /// True when the result expresses no preference at all
    pub fn is_noop(&self) -> bool {
        self.audio_language_to_prefer.is_none()
            && self.subtitle_language_to_prefer.is_none()
            && !self.subtitles_disabled
    }
}

// =============================================================================
// Event Models
// =============================================================================

/// Full attribute set of one track as published in a `tracksChanged` event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codec: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_mime_type: Option<String>,
}

impl From<&Track> for TrackAttributes {
    fn from(track: &Track) -> Self {
        Self {
            id: track.id.clone(),
            language: track.language.clone(),
            label: track.label.clone(),
            codec: track.codec.clone(),
            bitrate: track.bitrate,
            channel_count: track.channel_count,
            sample_rate: track.sample_rate,
            container_mime_type: track.container_mime_type.clone(),
        }
    }
}

/// Subtitle side of a `tracksChanged` event: either the selected text track's
/// attributes or the disabled sentinel when none is selected.
///
/// Serialize-only: the two variants are indistinguishable on the wire by
/// design (both are plain objects), and events only ever flow outward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SubtitleStatus {
    Track(TrackAttributes),
    Disabled { id: String },
}

impl SubtitleStatus {
    /// The disabled-sentinel variant
    pub fn disabled() -> Self {
        SubtitleStatus::Disabled {
            id: DISABLED_TRACK_ID.to_string(),
        }
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, SubtitleStatus::Disabled { .. })
    }
}

/// Normalized track-change event published to bridge listeners.
///
/// Purely observational: it reports what the engine has selected right now,
/// which can transiently disagree with the selector's output while the engine
/// is still applying a prior instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TracksChangedEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_track: Option<TrackAttributes>,
    pub subtitle_track: SubtitleStatus,
}
