//! Track selection
//!
//! The one piece of real decision logic in the bridge: given a catalog
//! snapshot and the caller's request, decide which audio language to prefer
//! and whether subtitles are shown, forced off, or left to the engine.
//!
//! `select` is a total, pure function: no engine access, no side effects,
//! and no input can make it fail. Unmatched fields stay at their defaults,
//! which leaves the engine's own behavior in effect.

use crate::models::{SelectionRequest, SelectionResult, Track, TrackCatalog, TrackType};

/// Compute the selection instruction for one catalog/request pair.
///
/// Resolution order:
/// 1. Explicit audio match (by id, then locale): wins over everything and
///    forces subtitles off.
/// 2. Explicit subtitle match (by id, then locale).
/// 3. Preferred-locale fallback, only when neither explicit branch matched:
///    an audio match short-circuits the subtitle scan.
///
/// The `"#disabled"` subtitle sentinel is honored independently of all of
/// the above; nothing can turn subtitles back on once the caller forced
/// them off.
pub fn select(catalog: &TrackCatalog, request: &SelectionRequest) -> SelectionResult {
    let mut result = SelectionResult::default();
    let mut audio_explicit = false;
    let mut subtitle_explicit = false;

    if !request.audio_track_id.is_empty() || !request.audio_locale.is_empty() {
        if let Some(track) = match_explicit(
            catalog,
            TrackType::Audio,
            &request.audio_track_id,
            &request.audio_locale,
        ) {
            result.audio_language_to_prefer = track.language.clone();
            // An explicit audio choice always suppresses subtitles
            result.subtitles_disabled = true;
            audio_explicit = true;
        }
    }

    if !request.subtitle_track_id.is_empty() || !request.subtitle_locale.is_empty() {
        if let Some(track) = match_explicit(
            catalog,
            TrackType::Text,
            &request.subtitle_track_id,
            &request.subtitle_locale,
        ) {
            result.subtitle_language_to_prefer = track.language.clone();
            subtitle_explicit = true;
        }
    }

    // Device-preferred locale only applies when the caller's explicit intent
    // matched nothing; an audio hit short-circuits the subtitle scan.
    if !audio_explicit && !subtitle_explicit && !request.preferred_locale.is_empty() {
        if let Some(track) = first_by_language(catalog, TrackType::Audio, &request.preferred_locale)
        {
            result.audio_language_to_prefer = track.language.clone();
            result.subtitles_disabled = true;
        } else if let Some(track) =
            first_by_language(catalog, TrackType::Text, &request.preferred_locale)
        {
            result.subtitle_language_to_prefer = track.language.clone();
        }
    }

    // Evaluated independently of any match outcome
    if request.subtitles_forced_off() {
        result.subtitles_disabled = true;
    }

    result
}

/// Resolve one explicit id/locale branch against tracks of one type.
///
/// Id match first in catalog order; when a locale is also given, an id match
/// with the wrong language is discarded and the locale scan runs instead.
/// When the locale is unspecified, the id match alone suffices.
fn match_explicit<'a>(
    catalog: &'a TrackCatalog,
    track_type: TrackType,
    id: &str,
    locale: &str,
) -> Option<&'a Track> {
    let mut candidate = if id.is_empty() {
        None
    } else {
        catalog
            .of_type(track_type)
            .find(|t| t.id.as_deref() == Some(id))
    };

    if let Some(track) = candidate {
        if !locale.is_empty() && track.language.as_deref() != Some(locale) {
            candidate = None;
        }
    }

    if candidate.is_none() && !locale.is_empty() {
        candidate = first_by_language(catalog, track_type, locale);
    }

    candidate
}

fn first_by_language<'a>(
    catalog: &'a TrackCatalog,
    track_type: TrackType,
    locale: &str,
) -> Option<&'a Track> {
    catalog
        .of_type(track_type)
        .find(|t| t.language.as_deref() == Some(locale))
}
