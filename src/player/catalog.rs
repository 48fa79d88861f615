//! Catalog snapshots
//!
//! Transforms the engine's raw track-group report into an immutable
//! `TrackCatalog`, preserving report order and tolerating whatever metadata
//! the manifest failed to provide.

use crate::models::{Track, TrackCatalog};
use crate::player::engine::{RawTrack, RawTrackGroup, RawTrackReport};

/// Build a catalog snapshot from a raw engine report.
///
/// Order in equals order out: groups are flattened in report order and the
/// selector's first-match tie-break depends on that. Tracks with no id and no
/// language are kept; they are valid catalog members that simply never match
/// by id or locale.
pub fn build_catalog(report: &RawTrackReport) -> TrackCatalog {
    let tracks = report
        .groups
        .iter()
        .flat_map(|group| group.tracks.iter().map(|raw| to_track(group, raw)))
        .collect();
    TrackCatalog::new(tracks)
}

fn to_track(group: &RawTrackGroup, raw: &RawTrack) -> Track {
    Track {
        id: raw.id.clone(),
        track_type: group.track_type,
        language: raw.language.clone(),
        label: raw.label.clone(),
        codec: raw.codec.clone(),
        bitrate: raw.bitrate,
        channel_count: raw.channel_count,
        sample_rate: raw.sample_rate,
        container_mime_type: raw.container_mime_type.clone(),
        selected: raw.selected,
    }
}
